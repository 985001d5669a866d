//! Target languages and output files.

use serde::{Deserialize, Serialize};

/// A generation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenLang {
    Cpp,
    Python,
    Ruby,
    Perl,
    Xrc,
}

impl GenLang {
    pub const ALL: [GenLang; 5] = [
        GenLang::Cpp,
        GenLang::Python,
        GenLang::Ruby,
        GenLang::Perl,
        GenLang::Xrc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GenLang::Cpp => "C++",
            GenLang::Python => "Python",
            GenLang::Ruby => "Ruby",
            GenLang::Perl => "Perl",
            GenLang::Xrc => "XRC",
        }
    }

    /// Extension of the single output file (the source file for C++).
    pub fn extension(self) -> &'static str {
        match self {
            GenLang::Cpp => ".cpp",
            GenLang::Python => ".py",
            GenLang::Ruby => ".rb",
            GenLang::Perl => ".pm",
            GenLang::Xrc => ".xrc",
        }
    }

    /// Languages interpreted at runtime rather than compiled.
    pub fn is_scripted(self) -> bool {
        matches!(self, GenLang::Python | GenLang::Ruby | GenLang::Perl)
    }
}

impl std::fmt::Display for GenLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished output file, ready to hand to a writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    /// Path without extension, relative to the project's output directory.
    pub path: String,
    /// Extension including the leading dot.
    pub extension: String,
    pub content: String,
}

impl OutputFile {
    pub fn new(path: impl Into<String>, extension: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            extension: extension.into(),
            content: content.into(),
        }
    }

    /// Path with extension.
    pub fn full_path(&self) -> String {
        format!("{}{}", self.path, self.extension)
    }
}
