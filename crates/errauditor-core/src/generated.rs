//! Generated-code detection over raw source text.
//!
//! Follows the Go convention: a line `// Code generated <tool>. DO NOT EDIT.`
//! above the package clause marks the whole file as generated.

const GENERATED_HEADER: &[u8] = b"// Code generated ";
const GENERATED_FOOTER: &[u8] = b" DO NOT EDIT.";

/// Report whether `src` carries the generated-code marker.
///
/// Lines are scanned up to the package clause; the parse tree is not
/// consulted.
pub fn is_generated(src: &[u8]) -> bool {
    for line in src.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if is_marker(line) {
            return true;
        }
        if line.starts_with(b"package ") || line == b"package" {
            break;
        }
    }
    false
}

fn is_marker(line: &[u8]) -> bool {
    line.len() >= GENERATED_HEADER.len() + GENERATED_FOOTER.len()
        && line.starts_with(GENERATED_HEADER)
        && line.ends_with(GENERATED_FOOTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protoc_header() {
        let src = b"// Code generated by protoc-gen-go. DO NOT EDIT.\n// source: api.proto\n\npackage api\n";
        assert!(is_generated(src));
    }

    #[test]
    fn test_marker_after_other_comments() {
        let src = b"// +build linux\n\n// Code generated by stringer; DO NOT EDIT.\npackage kind\n";
        assert!(is_generated(src));

        let src = b"//go:build linux\r\n\r\n// Code generated by stringer. DO NOT EDIT.\r\npackage kind\r\n";
        assert!(is_generated(src));
    }

    #[test]
    fn test_footer_needs_trailing_period() {
        let src = b"// Code generated by x. DO NOT EDIT\npackage kind\n";
        assert!(!is_generated(src));
    }

    #[test]
    fn test_marker_below_package_clause_is_ignored() {
        let src = b"package kind\n\n// Code generated by hand. DO NOT EDIT.\n";
        assert!(!is_generated(src));
    }

    #[test]
    fn test_handwritten_file() {
        let src = b"// Package apperrors holds domain errors.\npackage apperrors\n";
        assert!(!is_generated(src));
    }

    #[test]
    fn test_header_and_footer_must_not_overlap() {
        assert!(!is_generated(b"// Code generated DO NOT EDIT.\npackage x\n"));
    }
}
