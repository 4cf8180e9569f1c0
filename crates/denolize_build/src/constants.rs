//! Default input selection.
//!
//! Globs are matched against paths relative to the root directory, with `*`
//! never crossing a `/`.

/// Files picked up when no `--include` is given
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.ts", "**/*.tsx", "**/*.js", "**/*.jsx", "**/*.mjs"];

/// Files skipped when no `--exclude` is given: dependencies, tests and dotfiles
pub const DEFAULT_EXCLUDE: &[&str] = &[
    "**/node_modules/**",
    "**/.*",
    "**/.*/**",
    "**/__test__/**",
    "**/__tests__/**",
    "**/__spec__/**",
    "**/__specs__/**",
    "**/*.test.*",
    "**/*.spec.*",
];
