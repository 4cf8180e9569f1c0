use oxc_ast::ast::Program;
use std::path::{Component, Path, PathBuf};

/// One parsed input file. The program lives in the allocator of whoever parsed it.
pub struct SourceUnit<'a> {
    /// Directory `path` is relative to; used to locate files while probing
    pub base_dir: PathBuf,
    pub path: PathBuf,
    pub source_text: &'a str,
    pub program: Program<'a>,
}

impl SourceUnit<'_> {
    /// Directory containing the file on disk
    pub fn containing_dir(&self) -> PathBuf {
        let full = self.base_dir.join(&self.path);
        full.parent().map(Path::to_path_buf).unwrap_or_else(|| self.base_dir.clone())
    }

    /// The file path with `/` separators, as fed to the name normalizer
    pub fn slash_path(&self) -> String {
        to_slash(&self.path)
    }
}

/// Output of transforming one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedFile {
    pub destination_name: String,
    pub text: String,
}

pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
