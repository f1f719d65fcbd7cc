use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::super::args::CommonArgs;
use crate::{
    config::{CONFIG_FILE_NAME, load_config},
    core::{Engine, FileOutcome, Mode, ScanOptions, process_file, scan_files},
};

/// Configuration, target files and compiled engine for one command run.
///
/// # Configuration Priority
///
/// 1. CLI positional paths, relative to the working directory
/// 2. `.catchfixrc.json` config file, searched upward from `--root` or the
///    working directory
/// 3. Built-in defaults
pub struct MigrationContext {
    pub root_dir: PathBuf,
    /// Target files in sorted order.
    pub files: Vec<PathBuf>,
    pub engine: Engine,
    pub verbose: bool,
}

impl MigrationContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let verbose = common.verbose;
        let cwd = env::current_dir()
            .and_then(|dir| dir.canonicalize())
            .context("Failed to resolve working directory")?;
        let start_dir = match &common.root {
            Some(root) => cwd.join(root).canonicalize().with_context(|| {
                format!("Failed to resolve root directory: {}", root.display())
            })?,
            None => cwd.clone(),
        };

        let loaded = load_config(&start_dir)?;
        if verbose {
            if loaded.from_file {
                eprintln!("Note: Using {}", loaded.root_dir.join(CONFIG_FILE_NAME).display());
            } else {
                eprintln!(
                    "Note: No {} found, using default configuration",
                    CONFIG_FILE_NAME
                );
            }
        }

        let config = loaded.config;
        let root_dir = loaded.root_dir;

        let targets: Vec<PathBuf> = if common.paths.is_empty() {
            config.targets().into_iter().map(PathBuf::from).collect()
        } else {
            common.paths.iter().map(|path| cwd.join(path)).collect()
        };

        let scan = scan_files(&ScanOptions {
            base_dir: &root_dir,
            paths: &targets,
            ignores: &config.ignores,
            extensions: &config.extensions,
            verbose,
        });

        if scan.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        let engine = Engine::new(config.idiom)?;

        Ok(Self {
            root_dir,
            files: scan.files.into_iter().collect(),
            engine,
            verbose,
        })
    }

    /// Run the per-file migration over every target in parallel.
    ///
    /// Outcomes are returned in the same order as [`Self::files`].
    pub fn migrate(&self, mode: Mode) -> Vec<(PathBuf, FileOutcome)> {
        self.files
            .par_iter()
            .map(|path| (path.clone(), process_file(&self.engine, path, mode)))
            .collect()
    }

    /// Path relative to the project root, for display.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
