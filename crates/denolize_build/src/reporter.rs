use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use crate::types::{EmittedFile, RunResult};

pub fn print_nothing_to_do<W: Write>(writer: &mut W, root: &str) -> io::Result<()> {
    debug!("No source files found");
    writeln!(writer, "{} No source files found under {}", "⚠".yellow().bold(), root.blue())?;
    writer.flush()?;
    Ok(())
}

/// Lists every file that was renamed or rewritten, then a one-line summary.
pub fn print_emitted<W: Write>(writer: &mut W, result: &RunResult) -> io::Result<()> {
    debug!("Printing {} emitted files", result.files.len());
    let touched: Vec<&EmittedFile> =
        result.files.iter().filter(|f| f.renamed || f.rewritten).collect();

    for (idx, file) in touched.iter().enumerate() {
        let is_last = idx == touched.len() - 1;
        let prefix = if is_last { "└──" } else { "├──" };
        let marker = match (file.renamed, file.rewritten) {
            (true, true) => "renamed, rewritten",
            (true, false) => "renamed",
            _ => "rewritten",
        };
        writeln!(
            writer,
            "{}  {} → {} ({})",
            prefix.dimmed(),
            file.source.display().to_string().bright_white(),
            file.destination.display().to_string().blue(),
            marker.dimmed()
        )?;
    }

    if !touched.is_empty() {
        writeln!(writer)?;
    }

    let verb = if result.dry_run { "Would write" } else { "Wrote" };
    writeln!(
        writer,
        "{} {} {} files ({} rewritten, {} renamed, {} copied unchanged)",
        "✓".green().bold(),
        verb,
        result.files.len().to_string().cyan(),
        result.rewritten_count().to_string().yellow(),
        result.renamed_count().to_string().yellow(),
        (result.files.len() - touched.len()).to_string().dimmed()
    )?;
    writer.flush()?;
    Ok(())
}
