use log::{debug, trace};
use oxc_ast::ast::{
    ExportAllDeclaration, ExportNamedDeclaration, ImportDeclaration, Program, StringLiteral,
};
use oxc_ast_visit::{Visit, walk};
use oxc_span::Span;
use std::path::Path;

use crate::{
    config::ResolverConfig,
    constants::{DECLARATION_EXTENSION, TYPE_REFERENCE_PRAGMA, TYPES_ENTRY},
    resolver::{FileProbe, resolve},
};

/// Replacement of the byte range `start..end` of the original text.
/// An insertion has `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Walks a whole program and records how every import/export specifier has to change.
///
/// The tree is only read. The result is a list of edits against the source text,
/// ordered by position, which [`apply_edits`] turns into the new file.
pub struct SpecifierRewriter<'c, P: FileProbe + ?Sized> {
    config: &'c ResolverConfig,
    probe: &'c P,
    containing_dir: &'c Path,
    dist_file_name: &'c str,
    source_text: &'c str,
    edits: Vec<SpecifierEdit>,
}

impl<'c, P: FileProbe + ?Sized> SpecifierRewriter<'c, P> {
    pub fn new(
        config: &'c ResolverConfig,
        probe: &'c P,
        containing_dir: &'c Path,
        dist_file_name: &'c str,
        source_text: &'c str,
    ) -> Self {
        Self { config, probe, containing_dir, dist_file_name, source_text, edits: Vec::new() }
    }

    pub fn rewrite(mut self, program: &Program<'_>) -> Vec<SpecifierEdit> {
        self.visit_program(program);
        trace!("Collected {} edits for {}", self.edits.len(), self.dist_file_name);
        self.edits
    }

    fn rewrite_declaration(&mut self, declaration: Span, literal: &StringLiteral<'_>) {
        let original = literal.value.as_str();

        let replacement = match self.config.mapping_for(original) {
            Some(mapping) => {
                let resolved = mapping.evaluate(self.dist_file_name);
                debug!("Mapped '{}' to '{}'", original, resolved.replacement);
                match resolved.type_reference {
                    // Declaration files reference declarations, not runtime modules
                    Some(type_reference) if is_declaration_destination(self.dist_file_name) => {
                        type_reference
                    }
                    Some(type_reference) => {
                        self.annotate(declaration, &type_reference);
                        resolved.replacement
                    }
                    None => resolved.replacement,
                }
            }
            None => resolve(original, self.containing_dir, self.config, self.probe),
        };

        if replacement == original {
            return;
        }

        let start = literal.span.start as usize;
        let quote = match self.source_text[start..].chars().next() {
            Some('\'') => '\'',
            _ => '"',
        };
        trace!("Rewriting '{}' -> '{}'", original, replacement);
        self.edits.push(SpecifierEdit {
            start,
            end: literal.span.end as usize,
            text: quote_specifier(&replacement, quote),
        });
    }

    fn annotate(&mut self, declaration: Span, type_reference: &str) {
        let start = declaration.start as usize;
        let line_start = self.source_text[..start].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
        let prefix = &self.source_text[line_start..start];
        let indent_len = prefix.len() - prefix.trim_start().len();
        let indent = &prefix[..indent_len];
        let pragma = format!("// {}=\"{}\"\n{}", TYPE_REFERENCE_PRAGMA, type_reference, indent);

        trace!("Annotating declaration at {} with '{}'", start, type_reference);
        if indent_len == prefix.len() {
            self.edits.push(SpecifierEdit { start, end: start, text: pragma });
        } else {
            // Another statement precedes the declaration on its line; the pragma must
            // start a line of its own, so the separating whitespace becomes a line break
            let gap = prefix.len() - prefix.trim_end().len();
            self.edits.push(SpecifierEdit {
                start: start - gap,
                end: start,
                text: format!("\n{}{}", indent, pragma),
            });
        }
    }
}

impl<'a, P: FileProbe + ?Sized> Visit<'a> for SpecifierRewriter<'_, P> {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        self.rewrite_declaration(it.span, &it.source);
        walk::walk_import_declaration(self, it);
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &it.source {
            self.rewrite_declaration(it.span, source);
        }
        walk::walk_export_named_declaration(self, it);
    }

    fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
        self.rewrite_declaration(it.span, &it.source);
        walk::walk_export_all_declaration(self, it);
    }
}

/// `*.d.ts` files and the canonical `types.ts` entry hold declarations only.
pub fn is_declaration_destination(dist_file_name: &str) -> bool {
    let file_name = dist_file_name.rsplit('/').next().unwrap_or(dist_file_name);
    dist_file_name.ends_with(DECLARATION_EXTENSION) || file_name == TYPES_ENTRY
}

/// Splices `edits` into `source`, copying everything else byte for byte.
pub fn apply_edits(source: &str, edits: &[SpecifierEdit]) -> String {
    let mut sorted: Vec<&SpecifierEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.start, e.end));

    let extra: usize = sorted.iter().map(|e| e.text.len()).sum();
    let mut out = String::with_capacity(source.len() + extra);
    let mut cursor = 0;
    for edit in sorted {
        debug_assert!(edit.start >= cursor, "overlapping edits at {}", edit.start);
        out.push_str(&source[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }
    out.push_str(&source[cursor..]);
    out
}

fn quote_specifier(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        if c == quote || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}
