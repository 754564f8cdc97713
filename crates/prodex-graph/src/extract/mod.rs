//! Specifier extraction.
//!
//! Turns file text into the set of raw specifier strings referenced by the
//! language's import constructs. Extraction is a pure function of the text
//! (the path only selects the dialect); duplicates collapse and order is not
//! significant.
//!
//! # Example
//!
//! ```rust
//! use prodex_graph::extract::extract_specifiers;
//! use prodex_graph::Language;
//! use std::path::Path;
//!
//! let text = "import { a } from './a';\nconst b = require('./b');";
//! let specifiers = extract_specifiers(Language::Js, Path::new("main.ts"), text);
//! assert!(specifiers.contains("./a") && specifiers.contains("./b"));
//! ```

pub mod js;
pub mod php;

use std::collections::BTreeSet;
use std::path::Path;

use crate::language::Language;

pub use js::{ScanError, ScanStrategy};

/// Raw specifiers referenced by one file.
pub type Specifiers = BTreeSet<String>;

/// Extract raw specifiers from `text` using the rules of `language`.
pub fn extract_specifiers(language: Language, path: &Path, text: &str) -> Specifiers {
    match language {
        Language::Js => js::extract(path, text),
        Language::Php => php::extract(text),
    }
}
