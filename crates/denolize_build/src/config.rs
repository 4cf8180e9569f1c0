use anyhow::{Context, Result, bail};
use clap::Parser;
use denolize_core::ResolverConfig;
use log::{debug, info, trace};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::constants::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE};

#[derive(Debug, Clone, Parser)]
#[command(name = "denolize")]
#[command(version)]
#[command(about = "Transpile a package written for Node into a Deno module")]
pub struct Config {
    /// Root directory of the package
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Directory the converted module is written to
    #[arg(default_value = "dist")]
    pub out_dir: PathBuf,

    /// Glob (relative to the root) selecting input files; replaces the defaults
    #[arg(long = "include", value_name = "GLOB")]
    pub include: Vec<String>,

    /// Glob (relative to the root) of files to skip; replaces the defaults
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// JSON file redirecting module specifiers
    #[arg(long, value_name = "FILE")]
    pub import_map: Option<PathBuf>,

    /// Transform every file but write nothing
    #[arg(long)]
    pub dry_run: bool,

    #[clap(skip)]
    pub resolver: ResolverConfig,
}

impl Config {
    /// Initialize the config by resolving the root directory and loading the import map
    pub fn initialize(&mut self) -> Result<()> {
        if !self.root.is_dir() {
            bail!("Root directory {} does not exist", self.root.display());
        }
        self.root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
        info!("Using root directory: {}", self.root.display());

        if let Some(path) = &self.import_map {
            debug!("Reading import map from {}", path.display());
            self.resolver = read_import_map(path)?;
            info!("Loaded {} import mappings", self.resolver.imports.len());
        }
        Ok(())
    }

    pub fn include_patterns(&self) -> Vec<String> {
        patterns_or_default(&self.include, DEFAULT_INCLUDE)
    }

    pub fn exclude_patterns(&self) -> Vec<String> {
        patterns_or_default(&self.exclude, DEFAULT_EXCLUDE)
    }
}

fn patterns_or_default(given: &[String], defaults: &[&str]) -> Vec<String> {
    if given.is_empty() { defaults.iter().map(|p| p.to_string()).collect() } else { given.to_vec() }
}

/// Reads `{ "imports": { "<specifier>": "<url>" | { "replacement", "typeReference" } } }`.
pub fn read_import_map(path: &Path) -> Result<ResolverConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import map {}", path.display()))?;
    let cfg: ResolverConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse import map {}", path.display()))?;
    for (specifier, mapping) in &cfg.imports {
        trace!("Import mapping: '{}' -> {:?}", specifier, mapping);
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_positional_defaults() {
        let cfg = Config::parse_from(["denolize"]);
        assert_eq!(cfg.root, PathBuf::from("."));
        assert_eq!(cfg.out_dir, PathBuf::from("dist"));
        assert!(!cfg.dry_run);
        assert_eq!(cfg.include_patterns().len(), DEFAULT_INCLUDE.len());
        assert_eq!(cfg.exclude_patterns().len(), DEFAULT_EXCLUDE.len());
    }

    #[test]
    fn test_positionals_and_flags() {
        let cfg = Config::parse_from([
            "denolize",
            "packages/ui",
            "deno",
            "--include",
            "src/**/*.ts",
            "--exclude",
            "**/*.stories.*",
            "--dry-run",
        ]);
        assert_eq!(cfg.root, PathBuf::from("packages/ui"));
        assert_eq!(cfg.out_dir, PathBuf::from("deno"));
        assert_eq!(cfg.include_patterns(), vec!["src/**/*.ts".to_string()]);
        assert_eq!(cfg.exclude_patterns(), vec!["**/*.stories.*".to_string()]);
        assert!(cfg.dry_run);
    }

    #[test]
    fn test_initialize_loads_import_map() {
        let temp_dir = TempDir::new().unwrap();
        let map = temp_dir.path().join("imports.json");
        fs::write(
            &map,
            r#"{ "imports": { "react": { "replacement": "https://cdn/react", "typeReference": "https://cdn/react.d.ts" }, "lodash": "https://cdn/lodash.js" } }"#,
        )
        .unwrap();

        let mut cfg = Config::parse_from(["denolize"]);
        cfg.root = temp_dir.path().to_path_buf();
        cfg.import_map = Some(map);
        cfg.initialize().unwrap();

        assert_eq!(cfg.resolver.imports.len(), 2);
        assert!(cfg.root.is_absolute());
    }

    #[test]
    fn test_initialize_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = Config::parse_from(["denolize"]);
        cfg.root = temp_dir.path().join("nope");
        assert!(cfg.initialize().is_err());
    }

    #[test]
    fn test_read_import_map_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let map = temp_dir.path().join("imports.json");
        fs::write(&map, "{ imports: ").unwrap();
        let err = read_import_map(&map).err().unwrap();
        assert!(err.to_string().contains("imports.json"));
    }

    #[test]
    fn test_read_import_map_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_import_map(&temp_dir.path().join("missing.json")).is_err());
    }
}
