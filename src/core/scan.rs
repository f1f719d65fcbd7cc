use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning for target files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Target files, sorted and de-duplicated.
    pub files: BTreeSet<PathBuf>,
    /// Paths that could not be accessed while walking directories.
    pub skipped_count: usize,
}

/// Inputs for [`scan_files`].
pub struct ScanOptions<'a> {
    pub base_dir: &'a Path,
    /// Files or directories, relative to `base_dir` unless absolute.
    /// Files are kept regardless of extension.
    pub paths: &'a [PathBuf],
    pub ignores: &'a [String],
    pub extensions: &'a [String],
    pub verbose: bool,
}

/// Expand paths into the set of files to migrate.
///
/// Explicit files are always kept, so a missing file surfaces later as a
/// per-file read error. Directories are walked for files with a matching
/// extension, skipping anything under an ignored path.
pub fn scan_files(options: &ScanOptions<'_>) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in options.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if options.verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(options.base_dir.join(p));
        }
    }

    let is_ignored = |path: &Path| {
        let path_str = path.to_string_lossy();
        literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
            || glob_patterns.iter().any(|p| p.matches(&path_str))
    };

    for raw in options.paths {
        let path = options.base_dir.join(raw);

        if path.is_dir() {
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        result.skipped_count += 1;
                        if options.verbose {
                            eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                        }
                        continue;
                    }
                };
                let entry_path = entry.path();
                if entry.file_type().is_file()
                    && has_extension(entry_path, options.extensions)
                    && !is_ignored(entry_path)
                {
                    result.files.insert(entry_path.to_path_buf());
                }
            }
        } else if path.exists() {
            if !is_ignored(&path) {
                result.files.insert(path);
            }
        } else {
            if options.verbose {
                eprintln!(
                    "{} Path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
            result.files.insert(path);
        }
    }

    result
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
