//! Language tags and the per-language keyword catalog.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// A language recognized by the keyword catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Python.
    Python,
    /// C and C++.
    Cpp,
    /// Java.
    Java,
    /// JavaScript.
    JavaScript,
    /// Any tag outside the catalog. Has no keywords.
    Unknown,
}

impl Language {
    /// Every catalogued language, in display order.
    pub const KNOWN: [Language; 4] = [
        Language::Python,
        Language::Cpp,
        Language::Java,
        Language::JavaScript,
    ];

    /// Resolve a free-form language tag (case-insensitive, surrounding whitespace ignored).
    ///
    /// Unrecognized tags resolve to [`Language::Unknown`] rather than failing.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "python" | "python3" | "py" => Self::Python,
            "cpp" | "c++" | "cc" | "cxx" => Self::Cpp,
            "java" => Self::Java,
            "javascript" | "js" | "node" => Self::JavaScript,
            _ => Self::Unknown,
        }
    }

    /// Guess the language from a file extension.
    ///
    /// Returns `None` for paths without a recognized extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "py" | "pyw" | "pyi" => Some(Self::Python),
            "c" | "h" | "cc" | "cpp" | "cxx" | "hpp" | "hh" => Some(Self::Cpp),
            "java" => Some(Self::Java),
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// Canonical lower-case name, as used in configuration keys.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::Unknown => "unknown",
        }
    }

    /// Built-in reserved words for this language.
    #[must_use]
    pub const fn builtin_keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Python => &[
                "def", "return", "if", "elif", "else", "for", "while", "class", "import", "from",
                "pass", "yield", "lambda", "try", "except", "with",
            ],
            Self::Cpp => &[
                "int", "long", "float", "double", "char", "void", "return", "if", "else", "for",
                "while", "class", "struct", "include",
            ],
            Self::Java => &[
                "class",
                "public",
                "private",
                "protected",
                "static",
                "final",
                "void",
                "int",
                "long",
                "double",
                "float",
                "char",
                "boolean",
                "return",
                "if",
                "else",
                "for",
                "while",
                "try",
                "import",
            ],
            Self::JavaScript => &[
                "function", "return", "if", "else", "for", "while", "class", "const", "let",
                "var", "new", "try", "catch", "throw", "import",
            ],
            Self::Unknown => &[],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup table from language to keyword set.
///
/// Starts from the built-in lists and can be extended with extra words
/// (typically from configuration) without touching the scoring code.
#[derive(Debug, Clone)]
pub struct KeywordCatalog {
    sets: FxHashMap<Language, FxHashSet<String>>,
    empty: FxHashSet<String>,
}

impl KeywordCatalog {
    /// Catalog holding only the built-in keyword lists.
    #[must_use]
    pub fn builtin() -> Self {
        let sets = Language::KNOWN
            .iter()
            .map(|lang| {
                let words = lang
                    .builtin_keywords()
                    .iter()
                    .map(|w| (*w).to_owned())
                    .collect();
                (*lang, words)
            })
            .collect();
        Self {
            sets,
            empty: FxHashSet::default(),
        }
    }

    /// Shared instance of the built-in catalog.
    pub fn shared() -> &'static KeywordCatalog {
        static CATALOG: OnceLock<KeywordCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::builtin)
    }

    /// Builder: add extra keywords for a language.
    ///
    /// Words are lower-cased to match the token stream. Extending
    /// [`Language::Unknown`] is ignored so that unknown tags stay keyword-free.
    #[must_use]
    pub fn with_extra<I, S>(mut self, language: Language, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if language == Language::Unknown {
            return self;
        }
        let set = self.sets.entry(language).or_default();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                set.insert(word);
            }
        }
        self
    }

    /// Keyword set for a language; empty for [`Language::Unknown`].
    #[must_use]
    pub fn keywords(&self, language: Language) -> &FxHashSet<String> {
        self.sets.get(&language).unwrap_or(&self.empty)
    }

    /// Keywords for a language sorted alphabetically (for display).
    #[must_use]
    pub fn sorted_keywords(&self, language: Language) -> Vec<&str> {
        let mut words: Vec<&str> = self.keywords(language).iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_is_case_insensitive() {
        assert_eq!(Language::from_tag("Python"), Language::Python);
        assert_eq!(Language::from_tag("  JAVA "), Language::Java);
        assert_eq!(Language::from_tag("JavaScript"), Language::JavaScript);
        assert_eq!(Language::from_tag("CPP"), Language::Cpp);
    }

    #[test]
    fn test_from_tag_aliases() {
        assert_eq!(Language::from_tag("py"), Language::Python);
        assert_eq!(Language::from_tag("c++"), Language::Cpp);
        assert_eq!(Language::from_tag("js"), Language::JavaScript);
    }

    #[test]
    fn test_from_path_uses_extension() {
        assert_eq!(Language::from_path(Path::new("a/b.PY")), Some(Language::Python));
        assert_eq!(Language::from_path(Path::new("main.cpp")), Some(Language::Cpp));
        assert_eq!(Language::from_path(Path::new("App.java")), Some(Language::Java));
        assert_eq!(Language::from_path(Path::new("x.mjs")), Some(Language::JavaScript));
        assert_eq!(Language::from_path(Path::new("notes.txt")), None);
        assert_eq!(Language::from_path(Path::new("-")), None);
    }

    #[test]
    fn test_unknown_language_has_no_keywords() {
        let catalog = KeywordCatalog::builtin();
        assert_eq!(Language::from_tag("cobol"), Language::Unknown);
        assert_eq!(Language::from_tag(""), Language::Unknown);
        assert!(catalog.keywords(Language::Unknown).is_empty());
    }

    #[test]
    fn test_keyword_sets_are_per_language() {
        let catalog = KeywordCatalog::builtin();
        assert!(catalog.keywords(Language::Python).contains("def"));
        assert!(!catalog.keywords(Language::Python).contains("function"));
        assert!(catalog.keywords(Language::JavaScript).contains("function"));
        assert!(catalog.keywords(Language::Cpp).contains("struct"));
        assert!(catalog.keywords(Language::Java).contains("boolean"));
    }

    #[test]
    fn test_with_extra_extends_and_lowercases() {
        let catalog = KeywordCatalog::builtin().with_extra(Language::Python, ["Async", " await "]);
        assert!(catalog.keywords(Language::Python).contains("async"));
        assert!(catalog.keywords(Language::Python).contains("await"));
        assert!(catalog.keywords(Language::Python).contains("def"));
    }

    #[test]
    fn test_with_extra_ignores_unknown() {
        let catalog = KeywordCatalog::builtin().with_extra(Language::Unknown, ["begin"]);
        assert!(catalog.keywords(Language::Unknown).is_empty());
    }
}
