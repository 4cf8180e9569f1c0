use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::PathBuf;

pub struct CollectorConfig {
    pub root: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Directory never descended into (the output directory when it lives under the root)
    pub skip_dir: Option<PathBuf>,
}

/// Walks the root and returns the matching files, relative to the root and sorted.
pub fn collect_sources(cfg: &CollectorConfig) -> Result<Vec<PathBuf>> {
    debug!("Collecting source files");
    let include = build_glob_set(&cfg.include)?;
    let exclude = build_glob_set(&cfg.exclude)?;

    let root = &cfg.root;
    debug!("Walking directory tree from root: {}", root.display());
    let skip_dir = cfg.skip_dir.clone();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(true)
        .git_ignore(true)
        .filter_entry(move |dent| skip_dir.as_deref() != Some(dent.path()))
        .build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        let Ok(rel_path) = p.strip_prefix(root) else {
            continue;
        };

        if !include.is_match(rel_path) {
            continue;
        }
        if exclude.is_match(rel_path) {
            trace!("Skipping excluded file: {}", rel_path.display());
            continue;
        }

        trace!("Found source file: {}", rel_path.display());
        files.push(rel_path.to_path_buf());
    }

    files.sort();
    debug!("Collected {} source files", files.len());
    Ok(files)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid glob pattern '{}'", pattern))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
