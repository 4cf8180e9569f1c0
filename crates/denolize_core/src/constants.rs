//! Constants for file extensions and naming conventions.
//!
//! This module centralizes the extension tables used when normalizing file
//! names and when probing for the file a relative specifier points at.
//!
//! ## Supported Extensions
//!
//! - **TypeScript**: `.ts`, `.tsx`, `.d.ts` (declarations only)
//! - **JavaScript**: `.js`, `.jsx`, `.mjs` (ES module)
//!
//! ## Entry Files
//!
//! - `index.<ext>` becomes `mod.<ext>`
//! - `index.d.ts` becomes `types.ts`

/// Extensions to try when resolving an extension-less relative specifier (in priority order)
pub const CANDIDATE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs"];

/// Extensions recognized when splitting a path segment into stem and extension.
/// Multi-part extensions are matched before the single-part ones they end with.
pub const KNOWN_EXTENSIONS: &[&str] = &[".d.ts", ".ts", ".tsx", ".js", ".jsx", ".mjs"];

/// Extensions whose `index` file is renamed to the module entry
pub const ENTRY_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs"];

pub const DECLARATION_EXTENSION: &str = ".d.ts";
pub const INDEX_STEM: &str = "index";
pub const MODULE_ENTRY_STEM: &str = "mod";
pub const TYPES_ENTRY: &str = "types.ts";

/// Pragma used to point the type checker at a declaration file for an import
pub const TYPE_REFERENCE_PRAGMA: &str = "@deno-types";
