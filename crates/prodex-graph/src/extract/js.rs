//! JS/TS specifier extraction.
//!
//! Two strategies implement the same capability. The structured scan parses
//! the module with oxc and only sees real module syntax, so specifiers in
//! strings and comments are never matched. When the parser cannot make sense
//! of the file, the pattern scan takes over and matches the same four shapes
//! textually: static imports, dynamic `import()`, `require()` and
//! `export * from`.

use std::path::Path;

use once_cell::sync::Lazy;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, CallExpression, ExportAllDeclaration, ExportNamedDeclaration, Expression,
    ImportDeclaration, ImportExpression,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;
use regex::Regex;

use super::Specifiers;

/// How a file's specifiers are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Parse the module and visit import/export/require nodes.
    Structured,
    /// Regex matching over raw text.
    Pattern,
}

/// The structured scan could not parse the file.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("parser panicked")]
    Panicked,

    #[error("{count} syntax error(s), first: {first}")]
    Syntax { count: usize, first: String },
}

/// Extract with the structured scan, falling back to patterns on failure.
pub fn extract(path: &Path, text: &str) -> Specifiers {
    match scan(ScanStrategy::Structured, path, text) {
        Ok(specifiers) => specifiers,
        Err(err) => {
            tracing::debug!(
                "[js-extract] structured scan failed for {}: {err}; using patterns",
                path.display()
            );
            scan_patterns(text)
        }
    }
}

/// Run one strategy without fallback.
pub fn scan(strategy: ScanStrategy, path: &Path, text: &str) -> Result<Specifiers, ScanError> {
    match strategy {
        ScanStrategy::Structured => scan_structured(path, text),
        ScanStrategy::Pattern => Ok(scan_patterns(text)),
    }
}

fn source_type_for(path: &Path) -> SourceType {
    SourceType::from_path(path).unwrap_or_else(|_| SourceType::ts())
}

fn scan_structured(path: &Path, text: &str) -> Result<Specifiers, ScanError> {
    let allocator = Allocator::default();
    let ParserReturn {
        program,
        errors,
        panicked,
        ..
    } = Parser::new(&allocator, text, source_type_for(path)).parse();

    if panicked {
        return Err(ScanError::Panicked);
    }
    if let Some(first) = errors.first() {
        return Err(ScanError::Syntax {
            count: errors.len(),
            first: first.to_string(),
        });
    }

    let mut collector = SpecifierCollector::default();
    collector.visit_program(&program);
    Ok(collector.specifiers)
}

/// AST visitor collecting string-literal module sources.
#[derive(Default)]
struct SpecifierCollector {
    specifiers: Specifiers,
}

impl SpecifierCollector {
    fn add(&mut self, specifier: &str) {
        if !specifier.is_empty() {
            self.specifiers.insert(specifier.to_string());
        }
    }
}

impl<'a> Visit<'a> for SpecifierCollector {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        self.add(it.source.value.as_str());
    }

    fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
        self.add(it.source.value.as_str());
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &it.source {
            self.add(source.value.as_str());
        }
        walk::walk_export_named_declaration(self, it);
    }

    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        // Computed sources are out of reach for static resolution.
        if let Expression::StringLiteral(literal) = &it.source {
            self.add(literal.value.as_str());
        }
        walk::walk_import_expression(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        let is_require = matches!(
            &it.callee,
            Expression::Identifier(ident) if ident.name.as_str() == "require"
        );
        if is_require && it.arguments.len() == 1 {
            if let Some(Argument::StringLiteral(literal)) = it.arguments.first() {
                self.add(literal.value.as_str());
            }
        }
        walk::walk_call_expression(self, it);
    }
}

static PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r#"import\s+[^'"]*['"]([^'"]+)['"]"#).expect("static import pattern"),
        Regex::new(r#"import\(\s*['"]([^'"]+)['"]\s*\)"#).expect("dynamic import pattern"),
        Regex::new(r#"require\(\s*['"]([^'"]+)['"]\s*\)"#).expect("require pattern"),
        Regex::new(r#"export\s+\*\s+(?:as\s+[\w$]+\s+)?from\s+['"]([^'"]+)['"]"#)
            .expect("re-export pattern"),
    ]
});

fn scan_patterns(text: &str) -> Specifiers {
    let mut specifiers = Specifiers::new();
    for pattern in PATTERNS.iter() {
        for captures in pattern.captures_iter(text) {
            if let Some(m) = captures.get(1) {
                specifiers.insert(m.as_str().to_string());
            }
        }
    }
    specifiers
}
