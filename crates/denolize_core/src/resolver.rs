use dashmap::DashMap;
use log::{debug, trace};
use path_clean::clean;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::ResolverConfig;

/// Existence check used while probing candidate extensions.
pub trait FileProbe: Sync {
    fn is_file(&self, path: &Path) -> bool;
}

/// Probes the real filesystem, memoizing answers so files imported from many
/// places are only stat'ed once per run.
#[derive(Debug, Default)]
pub struct DiskProbe {
    cache: DashMap<PathBuf, bool>,
}

impl DiskProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

impl FileProbe for DiskProbe {
    fn is_file(&self, path: &Path) -> bool {
        if let Some(v) = self.cache.get(path) {
            trace!("Cache hit for probe: {}", path.display());
            return *v;
        }
        // Permission and I/O errors count as a miss
        let found = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
        trace!("Probed {}: {}", path.display(), found);
        self.cache.insert(path.to_path_buf(), found);
        found
    }
}

/// Relative specifiers start with `.`, absolute ones with `/`. Everything else
/// is a bare (package) specifier.
pub fn is_bare_specifier(specifier: &str) -> bool {
    !(specifier.starts_with('.') || Path::new(specifier).is_absolute())
}

/// Decides the replacement for a specifier found in a file living in `containing_dir`.
///
/// Bare specifiers and specifiers whose target cannot be found under any of the
/// candidate extensions are returned unchanged. When a candidate exists, the
/// specifier gets that extension and is normalized to the destination naming.
///
/// Normalization runs on the specifier with its extension appended, not on the
/// bare specifier, so `./index` becomes `./mod.ts` like the file it points at.
pub fn resolve<P: FileProbe + ?Sized>(
    specifier: &str,
    containing_dir: &Path,
    config: &ResolverConfig,
    probe: &P,
) -> String {
    if is_bare_specifier(specifier) {
        trace!("Leaving bare specifier '{}' untouched", specifier);
        return specifier.to_string();
    }

    let p = if Path::new(specifier).is_absolute() {
        clean(specifier)
    } else {
        clean(containing_dir.join(specifier).to_string_lossy().to_string())
    };
    let base = Path::new(&p);
    trace!("Resolving '{}' from {} via {}", specifier, containing_dir.display(), base.display());

    for ext in &config.candidate_extensions {
        let candidate = PathBuf::from(format!("{}{}", base.display(), ext));
        if probe.is_file(&candidate) {
            let resolved = config.naming.normalize(&format!("{}{}", specifier, ext));
            debug!("Resolved '{}' to '{}'", specifier, resolved);
            return resolved;
        }
    }

    trace!("No candidate found for '{}', keeping it as written", specifier);
    specifier.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashSet, sync::Mutex};
    use tempfile::TempDir;

    struct StubProbe {
        files: HashSet<PathBuf>,
        probed: Mutex<Vec<PathBuf>>,
    }

    impl StubProbe {
        fn new(files: &[&str]) -> Self {
            Self {
                files: files.iter().map(PathBuf::from).collect(),
                probed: Mutex::new(Vec::new()),
            }
        }

        fn probed(&self) -> Vec<PathBuf> {
            self.probed.lock().unwrap().clone()
        }
    }

    impl FileProbe for StubProbe {
        fn is_file(&self, path: &Path) -> bool {
            self.probed.lock().unwrap().push(path.to_path_buf());
            self.files.contains(path)
        }
    }

    fn cfg() -> ResolverConfig {
        ResolverConfig::default()
    }

    #[test]
    fn test_bare_specifier_untouched() {
        let probe = StubProbe::new(&["/project/lodash.ts"]);
        assert_eq!(resolve("lodash", Path::new("/project"), &cfg(), &probe), "lodash");
        assert_eq!(resolve("@scope/pkg/sub", Path::new("/project"), &cfg(), &probe), "@scope/pkg/sub");
        assert!(probe.probed().is_empty());
    }

    #[test]
    fn test_relative_specifier_gets_extension_and_snake_case() {
        let probe = StubProbe::new(&["/project/utils/Helper.ts"]);
        let out = resolve("./Helper", Path::new("/project/utils"), &cfg(), &probe);
        assert_eq!(out, "./helper.ts");
    }

    #[test]
    fn test_parent_specifier() {
        let probe = StubProbe::new(&["/project/shared/ColorSchema.tsx"]);
        let out = resolve("../shared/ColorSchema", Path::new("/project/app"), &cfg(), &probe);
        assert_eq!(out, "../shared/color_schema.tsx");
    }

    #[test]
    fn test_first_candidate_wins() {
        let probe = StubProbe::new(&["/p/a.js", "/p/a.tsx"]);
        assert_eq!(resolve("./a", Path::new("/p"), &cfg(), &probe), "./a.tsx");
        assert_eq!(
            probe.probed(),
            vec![PathBuf::from("/p/a.ts"), PathBuf::from("/p/a.tsx")]
        );
    }

    #[test]
    fn test_unresolved_specifier_kept_verbatim() {
        let probe = StubProbe::new(&[]);
        let out = resolve("./Missing/Thing", Path::new("/p"), &cfg(), &probe);
        assert_eq!(out, "./Missing/Thing");
        assert_eq!(probe.probed().len(), 5);
    }

    #[test]
    fn test_directory_specifier_kept_verbatim() {
        let probe = StubProbe::new(&["/p/components/index.ts"]);
        assert_eq!(resolve("./components", Path::new("/p"), &cfg(), &probe), "./components");
    }

    #[test]
    fn test_index_specifier_points_at_module_entry() {
        let probe = StubProbe::new(&["/p/components/index.ts"]);
        assert_eq!(
            resolve("./components/index", Path::new("/p"), &cfg(), &probe),
            "./components/mod.ts"
        );
    }

    #[test]
    fn test_absolute_specifier_probed_as_is() {
        let probe = StubProbe::new(&["/lib/Util.js"]);
        assert_eq!(resolve("/lib/Util", Path::new("/elsewhere"), &cfg(), &probe), "/lib/util.js");
    }

    #[test]
    fn test_custom_candidate_extensions() {
        let probe = StubProbe::new(&["/p/a.ts", "/p/a.mts"]);
        let mut config = cfg();
        config.candidate_extensions = vec![".mts".to_string(), ".ts".to_string()];
        assert_eq!(resolve("./a", Path::new("/p"), &config, &probe), "./a.mts");
    }

    #[test]
    fn test_is_bare_specifier() {
        assert!(is_bare_specifier("react"));
        assert!(is_bare_specifier("https://deno.land/std/path/mod.ts"));
        assert!(!is_bare_specifier("./a"));
        assert!(!is_bare_specifier("../a"));
        assert!(!is_bare_specifier("/a"));
    }

    #[test]
    fn test_disk_probe_finds_files_not_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("dir.ts")).unwrap();
        fs::write(root.join("file.ts"), "export {}").unwrap();

        let probe = DiskProbe::new();
        assert!(probe.is_file(&root.join("file.ts")));
        assert!(!probe.is_file(&root.join("dir.ts")));
        assert!(!probe.is_file(&root.join("missing.ts")));
        assert_eq!(probe.cached_entries(), 3);
    }

    #[test]
    fn test_disk_probe_memoizes() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("late.ts");

        let probe = DiskProbe::new();
        assert!(!probe.is_file(&file));
        fs::write(&file, "").unwrap();
        // The first answer sticks for the lifetime of the probe
        assert!(!probe.is_file(&file));
        assert!(DiskProbe::new().is_file(&file));
    }

    #[test]
    fn test_resolve_against_disk() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("utils")).unwrap();
        fs::write(root.join("utils/Helper.ts"), "export const x = 1;").unwrap();

        let probe = DiskProbe::new();
        let out = resolve("./Helper", &root.join("utils"), &cfg(), &probe);
        assert_eq!(out, "./helper.ts");

        // Probing follows the source tree, so a sibling reached through `..` resolves too
        let out = resolve("../utils/Helper", &root.join("other"), &cfg(), &probe);
        assert_eq!(out, "../utils/helper.ts");
    }

    #[test]
    fn test_stub_probe_is_usable_through_dyn() {
        let probe = StubProbe::new(&["/p/a.ts"]);
        let dyn_probe: &dyn FileProbe = &probe;
        assert_eq!(resolve("./a", Path::new("/p"), &cfg(), dyn_probe), "./a.ts");
    }
}
