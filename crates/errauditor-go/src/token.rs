//! tree-sitter-go node kinds the lowering dispatches on.

pub const PACKAGE_CLAUSE: &str = "package_clause";
pub const PACKAGE_IDENTIFIER: &str = "package_identifier";
pub const COMMENT: &str = "comment";

pub const FUNCTION_DECLARATION: &str = "function_declaration";
pub const METHOD_DECLARATION: &str = "method_declaration";
pub const PARAMETER_LIST: &str = "parameter_list";
pub const PARAMETER_DECLARATION: &str = "parameter_declaration";
pub const TYPE_IDENTIFIER: &str = "type_identifier";

pub const RETURN_STATEMENT: &str = "return_statement";
pub const EXPRESSION_LIST: &str = "expression_list";
pub const CALL_EXPRESSION: &str = "call_expression";
pub const SELECTOR_EXPRESSION: &str = "selector_expression";

pub const IDENTIFIER: &str = "identifier";
pub const NIL: &str = "nil";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
pub const IOTA: &str = "iota";

pub const INT_LITERAL: &str = "int_literal";
pub const FLOAT_LITERAL: &str = "float_literal";
pub const IMAGINARY_LITERAL: &str = "imaginary_literal";
pub const RUNE_LITERAL: &str = "rune_literal";
pub const INTERPRETED_STRING_LITERAL: &str = "interpreted_string_literal";
pub const RAW_STRING_LITERAL: &str = "raw_string_literal";

pub const FIELD_NAME: &str = "name";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_RESULT: &str = "result";
pub const FIELD_BODY: &str = "body";
pub const FIELD_FUNCTION: &str = "function";
pub const FIELD_ARGUMENTS: &str = "arguments";
pub const FIELD_OPERAND: &str = "operand";
pub const FIELD_FIELD: &str = "field";
