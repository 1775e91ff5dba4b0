//! Language support for source trees.
//!
//! Generated projects are TypeScript; `.tsx`-like files use the TSX grammar
//! and plain `.ts` files the TypeScript grammar (which accepts `<T>expr` casts).

use std::path::Path;

use tree_sitter::Language;

use crate::error::AstError;

/// Supported grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    /// TypeScript without JSX.
    TypeScript,
    /// TypeScript with JSX. Also used for JavaScript files.
    #[default]
    Tsx,
}

impl Lang {
    /// Short language identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    /// tree-sitter grammar for this language.
    #[must_use]
    pub fn language(&self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Try to detect language from file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        Self::from_extension(&ext)
    }

    /// Detect language from a path, defaulting to TSX for anything unknown.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        Self::from_path(path).unwrap_or_default()
    }

    /// Try to detect language from extension string
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "jsx" | "js" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Get file extensions for this language
    #[must_use]
    pub fn extensions(&self) -> Vec<&'static str> {
        match self {
            Self::TypeScript => vec!["ts", "mts", "cts"],
            Self::Tsx => vec!["tsx", "jsx", "js", "mjs", "cjs"],
        }
    }
}

impl TryFrom<&str> for Lang {
    type Error = AstError;

    fn try_from(s: &str) -> Result<Self, AstError> {
        match s.to_lowercase().as_str() {
            "ts" | "typescript" => Ok(Self::TypeScript),
            "tsx" | "jsx" | "js" | "javascript" => Ok(Self::Tsx),
            _ => Err(AstError::UnsupportedLanguage(s.to_string())),
        }
    }
}
