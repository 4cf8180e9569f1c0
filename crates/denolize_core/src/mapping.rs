use serde::Deserialize;
use std::{fmt, sync::Arc};

/// A mapping evaluated for one declaration: the specifier to write and the
/// optional declaration file to annotate it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMapping {
    pub replacement: String,
    pub type_reference: Option<String>,
}

impl ResolvedMapping {
    pub fn new(replacement: impl Into<String>) -> Self {
        Self { replacement: replacement.into(), type_reference: None }
    }

    pub fn with_type_reference(mut self, type_reference: impl Into<String>) -> Self {
        self.type_reference = Some(type_reference.into());
        self
    }
}

type MappingFn = dyn Fn(&str) -> ResolvedMapping + Send + Sync;

/// Redirect for one exact module specifier.
#[derive(Clone, Deserialize)]
#[serde(untagged)]
pub enum ImportMapping {
    /// Replace the specifier with this text
    Literal(String),
    /// Replace the specifier and optionally point at a declaration file
    WithType {
        replacement: String,
        #[serde(default, rename = "typeReference")]
        type_reference: Option<String>,
    },
    /// Choose the replacement from the destination file name of the importing file
    #[serde(skip)]
    Computed(Arc<MappingFn>),
}

impl ImportMapping {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&str) -> ResolvedMapping + Send + Sync + 'static,
    {
        ImportMapping::Computed(Arc::new(f))
    }

    /// Collapses the mapping to a replacement for a file ending up at `dist_file_name`.
    pub fn evaluate(&self, dist_file_name: &str) -> ResolvedMapping {
        match self {
            ImportMapping::Literal(replacement) => ResolvedMapping::new(replacement.clone()),
            ImportMapping::WithType { replacement, type_reference } => ResolvedMapping {
                replacement: replacement.clone(),
                type_reference: type_reference.clone(),
            },
            ImportMapping::Computed(f) => f(dist_file_name),
        }
    }
}

impl fmt::Debug for ImportMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMapping::Literal(r) => f.debug_tuple("Literal").field(r).finish(),
            ImportMapping::WithType { replacement, type_reference } => f
                .debug_struct("WithType")
                .field("replacement", replacement)
                .field("type_reference", type_reference)
                .finish(),
            ImportMapping::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for ImportMapping {
    fn from(replacement: &str) -> Self {
        ImportMapping::Literal(replacement.to_string())
    }
}

impl From<ResolvedMapping> for ImportMapping {
    fn from(m: ResolvedMapping) -> Self {
        ImportMapping::WithType { replacement: m.replacement, type_reference: m.type_reference }
    }
}
