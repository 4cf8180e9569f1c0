use log::trace;
use std::sync::LazyLock;

use crate::constants::{
    DECLARATION_EXTENSION, ENTRY_EXTENSIONS, INDEX_STEM, KNOWN_EXTENSIONS, MODULE_ENTRY_STEM,
    TYPES_ENTRY,
};

static DEFAULT_POLICY: LazyLock<NamingPolicy> = LazyLock::new(NamingPolicy::default);

/// Extension tables driving file-name normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    /// Suffixes split off a segment before case conversion. The longest match wins.
    pub known_extensions: Vec<String>,
    /// Extensions (without the dot) for which `index.<ext>` becomes `mod.<ext>`
    pub entry_extensions: Vec<String>,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            known_extensions: KNOWN_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            entry_extensions: ENTRY_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl NamingPolicy {
    /// Maps a `/`-separated path to its canonical snake_case form.
    ///
    /// `.` and `..` segments are kept as-is, every other segment has its stem
    /// converted to snake_case while the recognized extension is left alone.
    /// Finally `index.d.ts` becomes `types.ts` and `index.<ext>` becomes
    /// `mod.<ext>`.
    pub fn normalize(&self, path_like: &str) -> String {
        let joined = path_like
            .split('/')
            .map(|segment| self.normalize_segment(segment))
            .collect::<Vec<_>>()
            .join("/");

        let renamed = self.rename_entry(joined);
        trace!("Normalized '{}' to '{}'", path_like, renamed);
        renamed
    }

    /// Splits a single path segment into `(stem, extension)`.
    pub fn split_extension<'s>(&self, segment: &'s str) -> (&'s str, &'s str) {
        self.known_extensions
            .iter()
            .filter(|ext| segment.len() > ext.len() && segment.ends_with(ext.as_str()))
            .max_by_key(|ext| ext.len())
            .map(|ext| segment.split_at(segment.len() - ext.len()))
            .unwrap_or((segment, ""))
    }

    fn normalize_segment(&self, segment: &str) -> String {
        if segment.is_empty() || segment == "." || segment == ".." {
            return segment.to_string();
        }
        let (stem, extension) = self.split_extension(segment);
        format!("{}{}", to_snake_case(stem), extension)
    }

    fn rename_entry(&self, path: String) -> String {
        let (dir, file_name) = match path.rfind('/') {
            Some(idx) => path.split_at(idx + 1),
            None => ("", path.as_str()),
        };

        if file_name.strip_prefix(INDEX_STEM) == Some(DECLARATION_EXTENSION) {
            return format!("{}{}", dir, TYPES_ENTRY);
        }

        if let Some(ext) =
            file_name.strip_prefix(INDEX_STEM).and_then(|rest| rest.strip_prefix('.'))
            && self.entry_extensions.iter().any(|e| e == ext)
        {
            return format!("{}{}.{}", dir, MODULE_ENTRY_STEM, ext);
        }

        path
    }
}

/// Normalizes a path with the default extension tables.
pub fn normalize(path_like: &str) -> String {
    DEFAULT_POLICY.normalize(path_like)
}

/// Converts a file stem from PascalCase/camelCase (optionally containing `.` or
/// `-` separators) to snake_case. Leading dots of hidden files are kept.
pub fn to_snake_case(stem: &str) -> String {
    let body = stem.trim_start_matches('.');
    let mut out = String::with_capacity(stem.len() + 4);
    out.push_str(&stem[..stem.len() - body.len()]);

    let mut prev: Option<char> = None;
    for ch in body.chars() {
        match ch {
            '.' | '-' => out.push('_'),
            c if c.is_uppercase() => {
                if prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            }
            c => out.push(c),
        }
        prev = Some(ch);
    }
    out
}
