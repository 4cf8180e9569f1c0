use anyhow::Result;
use log::debug;
use oxc_allocator::Allocator;
use std::path::Path;

use crate::{
    config::ResolverConfig,
    parser::parse_source,
    resolver::FileProbe,
    rewriter::{SpecifierRewriter, apply_edits},
    types::{SourceUnit, TransformedFile},
};

/// Produces the destination name and rewritten text for one parsed file.
///
/// The destination name is the normalized path of the unit; it is also what
/// computed import mappings receive as the importing file's name.
pub fn transform<P: FileProbe + ?Sized>(
    unit: &SourceUnit<'_>,
    config: &ResolverConfig,
    probe: &P,
) -> TransformedFile {
    let destination_name = config.naming.normalize(&unit.slash_path());
    let containing_dir = unit.containing_dir();

    let edits =
        SpecifierRewriter::new(config, probe, &containing_dir, &destination_name, unit.source_text)
            .rewrite(&unit.program);
    debug!(
        "Transformed {} -> {} ({} edits)",
        unit.path.display(),
        destination_name,
        edits.len()
    );

    let text = apply_edits(unit.source_text, &edits);
    TransformedFile { destination_name, text }
}

/// Parses and transforms one file in a fresh allocator.
pub fn transform_source<P: FileProbe + ?Sized>(
    base_dir: &Path,
    path: &Path,
    source_text: &str,
    config: &ResolverConfig,
    probe: &P,
) -> Result<TransformedFile> {
    let allocator = Allocator::default();
    let unit = parse_source(&allocator, base_dir, path, source_text)?;
    Ok(transform(&unit, config, probe))
}
