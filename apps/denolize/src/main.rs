use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use denolize_build::Config;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cfg = Config::parse();
    debug!("Parsed CLI arguments: {:?}", cfg);

    let start = Instant::now();
    let num_threads = rayon::current_num_threads();
    info!(
        "Converting {} into {} (using {} threads)",
        cfg.root.display(),
        cfg.out_dir.display(),
        num_threads
    );

    let root_display = cfg.root.display().to_string();
    let result = denolize_build::run_denolize(cfg)?;
    let elapsed_ms = start.elapsed().as_millis();

    if result.files.is_empty() {
        denolize_build::print_nothing_to_do(&mut stdout, &root_display)?;
        return Ok(());
    }

    denolize_build::print_emitted(&mut stdout, &result)?;
    writeln!(
        stdout,
        "\n{} Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        result.files.len().to_string().cyan(),
        num_threads.to_string().cyan()
    )?;
    stdout.flush()?;

    Ok(())
}
