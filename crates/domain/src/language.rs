//! Source language identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Canonical language identifiers derived from file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// `C#` source files.
    CSharp,
    /// `C` source files.
    C,
    /// `C++` source files.
    Cpp,
    /// `Go` source files.
    Go,
    /// `Java` source files.
    Java,
    /// `JavaScript` source files.
    JavaScript,
    /// `TypeScript` source files.
    TypeScript,
    /// `TypeScript` sources with JSX.
    Tsx,
    /// `Rust` source files.
    Rust,
    /// `PHP` source files.
    Php,
    /// `Swift` source files.
    Swift,
    /// `Kotlin` source files.
    Kotlin,
    /// `Scala` source files.
    Scala,
    /// `Objective-C` source files.
    #[serde(rename = "objective-c")]
    ObjectiveC,
    /// Unrecognized input, lexed with C-style comment rules.
    Text,
}

impl Language {
    /// Returns the canonical string identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CSharp => "csharp",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Go => "go",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::Rust => "rust",
            Self::Php => "php",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Scala => "scala",
            Self::ObjectiveC => "objective-c",
            Self::Text => "text",
        }
    }

    /// Derive a language identifier from a file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        let trimmed = extension.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Self::Text;
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "cs" | "csx" => Self::CSharp,
            "c" | "h" => Self::C,
            "cc" | "cpp" | "cxx" | "hh" | "hpp" | "hxx" => Self::Cpp,
            "go" => Self::Go,
            "java" => Self::Java,
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "mts" | "cts" => Self::TypeScript,
            "tsx" => Self::Tsx,
            "rs" => Self::Rust,
            "php" => Self::Php,
            "swift" => Self::Swift,
            "kt" | "kts" => Self::Kotlin,
            "scala" | "sc" => Self::Scala,
            "m" | "mm" => Self::ObjectiveC,
            _ => Self::Text,
        }
    }

    /// Derive a language identifier from a file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|value| value.to_str())
            .map_or(Self::Text, Self::from_extension)
    }

    /// Returns true when the language is a recognized source language.
    #[must_use]
    pub const fn is_source(self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
