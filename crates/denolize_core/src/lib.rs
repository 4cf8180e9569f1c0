//! Core of denolize: rewrites JavaScript/TypeScript sources to Deno module conventions.
//!
//! This crate provides:
//! - File-name normalization (snake_case, `index.*` -> `mod.*`, `index.d.ts` -> `types.ts`)
//! - Module specifier resolution with extension probing
//! - An AST visitor that rewrites import/export specifiers and adds
//!   `@deno-types` annotations for mapped imports
//! - The per-file transformer tying the above together
//!
//! # Examples
//!
//! ```no_run
//! use denolize_core::{DiskProbe, ResolvedMapping, ResolverConfig, transform_source};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ResolverConfig::default().with_import(
//!     "react",
//!     ResolvedMapping::new("https://cdn.example/react@16")
//!         .with_type_reference("https://example/react.d.ts"),
//! );
//! let source = std::fs::read_to_string("src/App.tsx")?;
//! let out = transform_source(Path::new("."), Path::new("src/App.tsx"), &source, &config, &DiskProbe::new())?;
//! println!("{} ({} bytes)", out.destination_name, out.text.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod constants;
mod mapping;
mod naming;
mod parser;
mod resolver;
mod rewriter;
mod transformer;
mod types;

// Re-export public API
pub use config::ResolverConfig;
pub use constants::{CANDIDATE_EXTENSIONS, ENTRY_EXTENSIONS, KNOWN_EXTENSIONS, TYPE_REFERENCE_PRAGMA};
pub use mapping::{ImportMapping, ResolvedMapping};
pub use naming::{NamingPolicy, normalize, to_snake_case};
pub use parser::parse_source;
pub use resolver::{DiskProbe, FileProbe, is_bare_specifier, resolve};
pub use rewriter::{SpecifierEdit, SpecifierRewriter, apply_edits, is_declaration_destination};
pub use transformer::{transform, transform_source};
pub use types::{SourceUnit, TransformedFile};
