use serde::Deserialize;
use std::collections::HashMap;

use crate::{constants::CANDIDATE_EXTENSIONS, mapping::ImportMapping, naming::NamingPolicy};

/// Settings shared by every file of one run.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Exact specifier text -> redirect
    #[serde(default)]
    pub imports: HashMap<String, ImportMapping>,

    /// Extensions probed for extension-less relative specifiers, first match wins
    #[serde(skip, default = "default_candidate_extensions")]
    pub candidate_extensions: Vec<String>,

    #[serde(skip)]
    pub naming: NamingPolicy,
}

fn default_candidate_extensions() -> Vec<String> {
    CANDIDATE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            imports: HashMap::new(),
            candidate_extensions: default_candidate_extensions(),
            naming: NamingPolicy::default(),
        }
    }
}

impl ResolverConfig {
    pub fn with_import(
        mut self,
        specifier: impl Into<String>,
        mapping: impl Into<ImportMapping>,
    ) -> Self {
        self.imports.insert(specifier.into(), mapping.into());
        self
    }

    pub fn mapping_for(&self, specifier: &str) -> Option<&ImportMapping> {
        self.imports.get(specifier)
    }
}
