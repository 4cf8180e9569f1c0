use anyhow::{Result, bail};
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::path::{Path, PathBuf};

use crate::{constants::DECLARATION_EXTENSION, types::SourceUnit};

/// Parses `source_text` into a [`SourceUnit`] allocated in `allocator`.
///
/// `path` is the file's location relative to `base_dir`. Fails when the parser
/// reports any syntax error; the transformation never runs on a partial tree.
pub fn parse_source<'a>(
    allocator: &'a Allocator,
    base_dir: &Path,
    path: &Path,
    source_text: &'a str,
) -> Result<SourceUnit<'a>> {
    trace!("Parsing {}", path.display());
    let st = source_type_for(path);
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(allocator, source_text, st).parse();

    if panicked || !errors.is_empty() {
        let messages = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
        bail!("Failed to parse {}: {}", path.display(), messages);
    }

    debug!("Parsed {} ({} statements)", path.display(), program.body.len());
    Ok(SourceUnit {
        base_dir: base_dir.to_path_buf(),
        path: PathBuf::from(path),
        source_text,
        program,
    })
}

fn source_type_for(path: &Path) -> SourceType {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let ext = path.extension().and_then(|e| e.to_str());

    // import/export declarations only exist in the module goal
    let st = SourceType::default()
        .with_module(true)
        // Plain JavaScript may carry JSX; only `.ts` keeps `<T>x` casts unambiguous
        .with_jsx(matches!(ext, Some("tsx" | "jsx" | "js" | "mjs" | "cjs")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts")));

    if file_name.ends_with(DECLARATION_EXTENSION) {
        st.with_typescript_definition(true)
    } else {
        st
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typescript() {
        let allocator = Allocator::default();
        let unit = parse_source(
            &allocator,
            Path::new("/project"),
            Path::new("src/App.ts"),
            "import type { Foo } from './Foo';\nexport const x: number = 1;",
        )
        .unwrap();
        assert_eq!(unit.program.body.len(), 2);
        assert_eq!(unit.path, PathBuf::from("src/App.ts"));
        assert_eq!(unit.containing_dir(), PathBuf::from("/project/src"));
    }

    #[test]
    fn test_parse_jsx() {
        let allocator = Allocator::default();
        let unit = parse_source(
            &allocator,
            Path::new("."),
            Path::new("Button.jsx"),
            "import React from 'react';\nexport default () => <button />;",
        )
        .unwrap();
        assert_eq!(unit.program.body.len(), 2);
    }

    #[test]
    fn test_parse_jsx_in_plain_javascript() {
        let allocator = Allocator::default();
        for name in ["Button.js", "Button.mjs"] {
            let unit = parse_source(
                &allocator,
                Path::new("."),
                Path::new(name),
                "import React from 'react';\nexport const B = () => <button />;\n",
            )
            .unwrap();
            assert_eq!(unit.program.body.len(), 2, "{}", name);
        }
    }

    #[test]
    fn test_parse_declaration_file() {
        let allocator = Allocator::default();
        let unit = parse_source(
            &allocator,
            Path::new("."),
            Path::new("index.d.ts"),
            "export declare function f(a: string): void;",
        )
        .unwrap();
        assert!(unit.program.source_type.is_typescript_definition());
    }

    #[test]
    fn test_parse_error_names_file() {
        let allocator = Allocator::default();
        let err = parse_source(
            &allocator,
            Path::new("."),
            Path::new("src/Broken.ts"),
            "import { from './x';",
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("src/Broken.ts"));
    }

    #[test]
    fn test_source_type_for() {
        assert!(source_type_for(Path::new("a.ts")).is_typescript());
        assert!(source_type_for(Path::new("a.tsx")).is_jsx());
        assert!(source_type_for(Path::new("a.mjs")).is_module());
        assert!(!source_type_for(Path::new("a.js")).is_typescript());
        assert!(source_type_for(Path::new("a.js")).is_jsx());
        assert!(!source_type_for(Path::new("a.ts")).is_jsx());
        assert!(source_type_for(Path::new("a.d.ts")).is_typescript_definition());
    }
}
