//! Converts a Node-style JavaScript/TypeScript package into a Deno module.
//!
//! This crate walks a package, runs every selected file through
//! [`denolize_core`] in parallel and writes the results below an output
//! directory.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use denolize_build::{Config, run_denolize};
//! use clap::Parser;
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::parse_from(["denolize", "packages/ui", "deno/ui"]);
//!
//! let result = run_denolize(cfg)?;
//!
//! // Use buffered output for better performance
//! let mut stdout = BufWriter::new(std::io::stdout());
//! denolize_build::print_emitted(&mut stdout, &result)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod collector;
mod config;
mod constants;
mod reporter;
mod runner;
mod types;
mod writer;

// Re-export public API
pub use collector::{CollectorConfig, collect_sources};
pub use config::{Config, read_import_map};
pub use constants::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE};
pub use reporter::{print_emitted, print_nothing_to_do};
pub use runner::run_denolize;
pub use types::{EmittedFile, RunResult};
pub use writer::write_output;
