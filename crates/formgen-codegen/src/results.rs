//! Per-form results.

use serde::{Deserialize, Serialize};

use crate::language::{GenLang, OutputFile};

/// Outcome of generating or writing one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenResultCode {
    Fail = -1,
    /// The file on disk already has this content.
    AlreadyExists = 0,
    Created = 1,
    /// Nothing to generate for this form and language.
    Ignored = 2,
    /// Content differs from disk; reported by dry runs.
    NeedsWriting = 3,
}

impl GenResultCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_failure(self) -> bool {
        self == GenResultCode::Fail
    }
}

/// Everything generated for one form in one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormOutput {
    /// Class name of the form (empty for ignored forms).
    pub class_name: String,
    pub language: GenLang,
    pub code: GenResultCode,
    pub files: Vec<OutputFile>,
    /// Non-fatal problems, in the order they were found.
    pub warnings: Vec<String>,
}

impl FormOutput {
    pub fn ignored(class_name: impl Into<String>, language: GenLang) -> Self {
        Self {
            class_name: class_name.into(),
            language,
            code: GenResultCode::Ignored,
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}
