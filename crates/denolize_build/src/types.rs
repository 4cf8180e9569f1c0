use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EmittedFile {
    /// Input path relative to the root
    pub source: PathBuf,
    /// Output path (below the output directory)
    pub destination: PathBuf,
    /// The file name changed during normalization
    pub renamed: bool,
    /// At least one specifier was rewritten or annotated
    pub rewritten: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub files: Vec<EmittedFile>,
    pub dry_run: bool,
}

impl RunResult {
    pub fn rewritten_count(&self) -> usize {
        self.files.iter().filter(|f| f.rewritten).count()
    }

    pub fn renamed_count(&self) -> usize {
        self.files.iter().filter(|f| f.renamed).count()
    }
}
