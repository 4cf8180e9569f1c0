use anyhow::{Context, Result, bail};
use denolize_core::{DiskProbe, TransformedFile, transform_source};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    thread,
};

use crate::{
    collector::{CollectorConfig, collect_sources},
    config::Config,
    types::{EmittedFile, RunResult},
    writer::write_output,
};

pub fn run_denolize(mut cfg: Config) -> Result<RunResult> {
    info!("Starting denolize");

    // Initialize config (resolve root, load import map)
    cfg.initialize()?;
    let root = cfg.root.clone();

    let collector_cfg = CollectorConfig {
        root: root.clone(),
        include: cfg.include_patterns(),
        exclude: cfg.exclude_patterns(),
        skip_dir: cfg.out_dir.canonicalize().ok(),
    };
    debug!(
        "Collecting sources with include={:?}, exclude={:?}",
        collector_cfg.include, collector_cfg.exclude
    );

    let sources = collect_sources(&collector_cfg)?;
    if sources.is_empty() {
        warn!("No source files found under {}", root.display());
        return Ok(RunResult { files: vec![], dry_run: cfg.dry_run });
    }
    info!("Found {} source files", sources.len());

    // Probe answers are shared by every worker
    let probe = DiskProbe::new();

    info!("Transforming {} files in parallel", sources.len());
    let transformed: Vec<(PathBuf, TransformedFile, bool)> = sources
        .par_iter()
        .map(|rel| -> Result<(PathBuf, TransformedFile, bool)> {
            let thread_id = thread::current().id();
            debug!("Thread {:?} processing: {}", thread_id, rel.display());

            let abs = root.join(rel);
            let source = fs::read_to_string(&abs)
                .with_context(|| format!("Failed to read {}", abs.display()))?;
            let out = transform_source(&root, rel, &source, &cfg.resolver, &probe)?;
            let rewritten = out.text != source;
            Ok((rel.clone(), out, rewritten))
        })
        .collect::<Result<_>>()?;
    debug!("Probe cache holds {} entries", probe.cached_entries());

    check_destination_collisions(&transformed)?;

    let mut files: Vec<EmittedFile> = transformed
        .par_iter()
        .map(|(rel, out, rewritten)| -> Result<EmittedFile> {
            let destination = if cfg.dry_run {
                cfg.out_dir.join(&out.destination_name)
            } else {
                write_output(&cfg.out_dir, out)?
            };
            trace!("{} -> {}", rel.display(), destination.display());
            Ok(EmittedFile {
                source: rel.clone(),
                destination,
                renamed: !same_name(rel, &out.destination_name),
                rewritten: *rewritten,
            })
        })
        .collect::<Result<_>>()?;
    files.sort_by(|a, b| a.destination.cmp(&b.destination));

    let result = RunResult { files, dry_run: cfg.dry_run };
    info!(
        "Denolize complete. {} files, {} rewritten, {} renamed",
        result.files.len(),
        result.rewritten_count(),
        result.renamed_count()
    );

    Ok(result)
}

/// Two inputs differing only in case (`Foo.ts`, `foo.ts`) would overwrite each other.
fn check_destination_collisions(transformed: &[(PathBuf, TransformedFile, bool)]) -> Result<()> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for (rel, out, _) in transformed {
        if let Some(previous) = seen.insert(out.destination_name.as_str(), rel.as_path()) {
            bail!(
                "{} and {} both map to {}",
                previous.display(),
                rel.display(),
                out.destination_name
            );
        }
    }
    Ok(())
}

fn same_name(rel: &Path, destination_name: &str) -> bool {
    let rel: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
    rel.join("/") == destination_name
}
