//! PHP specifier extraction.
//!
//! Recognises the four include/require keywords with a quoted literal and
//! `use` import statements (function/const imports, comma lists, `as`
//! aliases and grouped `use Ns\{A, B}`). Closure `use (...)` clauses and
//! anything that is not a qualified identifier are ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Specifiers;

static INCLUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:require_once|include_once|require|include)\s*\(?\s*['"]([^'"]+)['"]"#)
        .expect("include pattern")
});

static USE_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\buse\s+(\\?[A-Za-z_][^;\n{]*(?:\{[^}]*\})?)\s*;").expect("use statement pattern")
});

static NAMESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*namespace\s+([A-Za-z_][\w\\]*)\s*[;{]").expect("namespace pattern")
});

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_]\w*(?:\\[A-Za-z_]\w*)*$").expect("qualified name pattern")
});

/// One imported name from a `use` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseImport {
    /// Fully-qualified name, without a leading `\`.
    pub name: String,
    /// Local alias: the `as` name, or the last name segment.
    pub alias: String,
}

/// Extract include paths and `use` imports from PHP source.
pub fn extract(text: &str) -> Specifiers {
    let text = strip_comments(text);
    let text = text.as_str();
    let mut specifiers = Specifiers::new();

    for captures in INCLUDE.captures_iter(text) {
        if let Some(m) = captures.get(1) {
            specifiers.insert(m.as_str().to_string());
        }
    }

    specifiers.extend(use_imports(text).into_iter().map(|import| import.name));
    specifiers
}

/// All names imported by `use` statements, in source order.
pub fn use_imports(text: &str) -> Vec<UseImport> {
    let mut imports = Vec::new();
    for captures in USE_STATEMENT.captures_iter(&strip_comments(text)) {
        if let Some(body) = captures.get(1) {
            parse_use_body(body.as_str(), &mut imports);
        }
    }
    imports
}

/// The file's `namespace` declaration, if any.
pub fn namespace_of(text: &str) -> Option<String> {
    NAMESPACE
        .captures(&strip_comments(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Blank out `//`, `#` and `/* */` comments, leaving string literals and
/// line breaks in place. `#[` starts an attribute, not a comment.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => skip_line(&mut chars, &mut out),
            '#' if chars.peek() != Some(&'[') => skip_line(&mut chars, &mut out),
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

fn skip_line(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) {
    for c in chars.by_ref() {
        if c == '\n' {
            out.push('\n');
            break;
        }
    }
}

fn parse_use_body(body: &str, out: &mut Vec<UseImport>) {
    let body = strip_kind(body.trim());

    if let Some(open) = body.find('{') {
        let prefix = body[..open].trim().trim_end_matches('\\');
        let inner_end = body[open..].find('}').map_or(body.len(), |i| open + i);
        let inner = &body[open + 1..inner_end];
        for item in inner.split(',') {
            let item = strip_kind(item.trim());
            if item.is_empty() {
                continue;
            }
            push_import(&format!("{prefix}\\{item}"), out);
        }
    } else {
        for item in body.split(',') {
            push_import(item.trim(), out);
        }
    }
}

fn strip_kind(item: &str) -> &str {
    for kind in ["function ", "const "] {
        if let Some(rest) = item.strip_prefix(kind) {
            return rest.trim_start();
        }
    }
    item
}

fn push_import(item: &str, out: &mut Vec<UseImport>) {
    let (name, alias) = match split_alias(item) {
        Some((name, alias)) => (name, Some(alias)),
        None => (item, None),
    };
    let name = name.trim().trim_start_matches('\\');
    if !QUALIFIED_NAME.is_match(name) {
        return;
    }

    let alias = alias
        .map(str::to_string)
        .unwrap_or_else(|| last_segment(name).to_string());
    out.push(UseImport {
        name: name.to_string(),
        alias,
    });
}

fn split_alias(item: &str) -> Option<(&str, &str)> {
    let mut parts = item.split_whitespace();
    let name = parts.next()?;
    match (parts.next(), parts.next(), parts.next()) {
        (Some(kw), Some(alias), None) if kw.eq_ignore_ascii_case("as") => Some((name, alias)),
        _ => None,
    }
}

/// Last `\`-separated segment of a qualified name.
pub fn last_segment(name: &str) -> &str {
    name.rsplit('\\').next().unwrap_or(name)
}
