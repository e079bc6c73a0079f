//! Target expansion: command-line targets to the list of files to audit.
//!
//! Targets are handled in the order files, directories, packages. Every
//! failure below this point belongs to one target: it is logged and the
//! target contributes nothing.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::WalkBuilder;
use regex::Regex;
use tracing::{debug, info};

use errauditor_error::{Error, ErrorKind, Result};

/// Target used when none is given.
pub const ALL_PACKAGES: &str = "./...";

const RECURSIVE_SUFFIX: &str = "/...";

/// One command-line target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `dir/...`: every package directory below `dir`.
    Tree(PathBuf),
    Dir(PathBuf),
    File(PathBuf),
    /// Import path, resolved through [`GoEnv::resolve_package`].
    Package(String),
}

impl Target {
    pub fn classify(arg: &str) -> Self {
        if let Some(root) = arg.strip_suffix(RECURSIVE_SUFFIX) {
            if Path::new(root).is_dir() {
                return Target::Tree(PathBuf::from(root));
            }
        }
        let path = Path::new(arg);
        if path.is_dir() {
            Target::Dir(path.to_path_buf())
        } else if path.exists() {
            Target::File(path.to_path_buf())
        } else {
            Target::Package(arg.to_string())
        }
    }
}

/// Compiled `--exclude` patterns, matched against directory paths.
#[derive(Debug, Clone, Default)]
pub struct Excludes {
    patterns: Vec<Regex>,
}

impl Excludes {
    /// A malformed pattern is a fatal configuration error.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern.as_ref()).map_err(|e| {
                    Error::config_invalid(format!("failed to parse exclude dir pattern: {e}"))
                        .with_operation("discovery::compile_excludes")
                        .with_context("pattern", pattern.as_ref())
                        .set_source(e)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// `dir` is matched without the `./` prefix the default `./...` walk adds.
    pub fn matches_dir(&self, dir: &str) -> bool {
        let dir = dir.strip_prefix("./").unwrap_or(dir);
        self.patterns.iter().any(|pattern| pattern.is_match(dir))
    }

    /// A file is excluded when its containing directory matches.
    pub fn excludes_file(&self, path: &Path) -> bool {
        !self.is_empty() && self.matches_dir(&parent_dir(path))
    }
}

fn parent_dir(path: &Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    }
}

/// Where package targets are looked up.
#[derive(Debug, Clone, Default)]
pub struct GoEnv {
    /// Starting point of the `go.mod` search.
    pub cwd: PathBuf,
    pub gopath: Vec<PathBuf>,
    pub goroot: Option<PathBuf>,
}

impl GoEnv {
    /// `GOPATH` defaults to `$HOME/go`.
    pub fn from_env() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let gopath = match env::var_os("GOPATH") {
            Some(value) if !value.is_empty() => env::split_paths(&value).collect(),
            _ => env::var_os("HOME")
                .map(|home| vec![PathBuf::from(home).join("go")])
                .unwrap_or_default(),
        };
        let goroot = env::var_os("GOROOT")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self { cwd, gopath, goroot }
    }

    /// Find the directory of package `name`: the enclosing module first,
    /// then each `GOPATH` entry, then `GOROOT`.
    pub fn resolve_package(&self, name: &str) -> Result<PathBuf> {
        if let Some(dir) = self.resolve_in_module(name) {
            return Ok(dir);
        }
        for root in self.gopath.iter().chain(self.goroot.iter()) {
            let dir = root.join("src").join(name);
            if dir.is_dir() {
                return Ok(dir);
            }
        }
        Err(Error::package_not_found(name).with_operation("discovery::resolve_package"))
    }

    fn resolve_in_module(&self, name: &str) -> Option<PathBuf> {
        let (root, module) = find_module(&self.cwd)?;
        let dir = if name == module {
            root
        } else {
            let rest = name.strip_prefix(module.as_str())?.strip_prefix('/')?;
            root.join(rest)
        };
        dir.is_dir().then_some(dir)
    }
}

/// Nearest `go.mod` at or above `start`, with its module path.
fn find_module(start: &Path) -> Option<(PathBuf, String)> {
    for dir in start.ancestors() {
        if let Ok(text) = fs::read_to_string(dir.join("go.mod")) {
            return module_path(&text).map(|module| (dir.to_path_buf(), module));
        }
    }
    None
}

/// The path declared by the `module` directive of a `go.mod` file.
pub fn module_path(go_mod: &str) -> Option<String> {
    for line in go_mod.lines() {
        let line = line.split("//").next().unwrap_or_default().trim();
        let Some(rest) = line.strip_prefix("module") else {
            continue;
        };
        if !rest.starts_with(|c: char| c.is_whitespace() || c == '"') {
            continue;
        }
        let name = rest.trim().trim_matches('"');
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    None
}

fn should_skip_dir(name: &str) -> bool {
    name == "testdata" || name == "vendor" || name.starts_with('.') || name.starts_with('_')
}

/// Every directory below `root`, `root` included, in file-name order.
pub fn package_dirs(root: &Path) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return false;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !should_skip_dir(name))
        });

    let mut dirs = Vec::new();
    for entry in builder.build() {
        match entry {
            Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_dir()) => {
                dirs.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => {
                let err = Error::traversal_failed(format!("failed to walk {}: {e}", root.display()))
                    .with_operation("discovery::package_dirs");
                debug!(error = %err, "skipping unreadable entry");
            }
        }
    }
    dirs
}

/// Source files directly inside `dir`, sorted by name.
///
/// Names starting with `.` or `_` are ignored, like the go tool does.
pub fn source_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::from(e)
            .with_operation("discovery::source_files")
            .with_context("dir", dir.display().to_string())
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type().is_ok_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext))
        {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(Error::no_source_files(dir.display().to_string()));
    }
    files.sort();
    Ok(files)
}

/// Deduplicating, exclusion-aware file list.
struct Collector<'a> {
    excludes: &'a Excludes,
    seen: HashSet<PathBuf>,
    files: Vec<PathBuf>,
    excluded: usize,
}

impl<'a> Collector<'a> {
    fn new(excludes: &'a Excludes) -> Self {
        Self {
            excludes,
            seen: HashSet::new(),
            files: Vec::new(),
            excluded: 0,
        }
    }

    fn add(&mut self, path: PathBuf) {
        if self.excludes.excludes_file(&path) {
            debug!(path = %path.display(), "excluded");
            self.excluded += 1;
            return;
        }
        if self.seen.insert(path.clone()) {
            self.files.push(path);
        }
    }

    fn add_dir(&mut self, dir: &Path, extensions: &[&str]) {
        match source_files(dir, extensions) {
            Ok(files) => files.into_iter().for_each(|file| self.add(file)),
            Err(err) if err.kind() == ErrorKind::NoSourceFiles => {
                debug!(dir = %dir.display(), "no source files");
            }
            Err(err) => debug!(dir = %dir.display(), error = %err, "failed to check dir"),
        }
    }
}

/// Expand `targets` (default `./...`) into the files to audit.
pub fn discover_files(
    targets: &[String],
    excludes: &Excludes,
    go_env: &GoEnv,
    extensions: &[&str],
) -> Vec<PathBuf> {
    let discovery_start = Instant::now();

    let default_targets = [ALL_PACKAGES.to_string()];
    let targets = if targets.is_empty() {
        &default_targets[..]
    } else {
        targets
    };

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    let mut packages = Vec::new();
    for arg in targets {
        match Target::classify(arg) {
            Target::Tree(root) => dirs.extend(package_dirs(&root)),
            Target::Dir(dir) => dirs.push(dir),
            Target::File(file) => files.push(file),
            Target::Package(name) => packages.push(name),
        }
    }

    let mut collector = Collector::new(excludes);
    for file in files {
        collector.add(file);
    }
    for dir in &dirs {
        collector.add_dir(dir, extensions);
    }
    for name in &packages {
        match go_env.resolve_package(name) {
            Ok(dir) => collector.add_dir(&dir, extensions),
            Err(err) => debug!(package = %name, error = %err, "failed to check package"),
        }
    }

    if collector.excluded > 0 {
        info!("Excluded {} files by pattern", collector.excluded);
    }
    info!(
        "File discovery: {:.2}s ({} files)",
        discovery_start.elapsed().as_secs_f64(),
        collector.files.len()
    );

    collector.files
}
