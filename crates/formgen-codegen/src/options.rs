//! Generation options.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::language::GenLang;

/// XRC output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrcOptions {
    /// Keep placeholder comments for forms and nodes XRC can't describe.
    pub add_comments: bool,
    /// Write the document without any indentation or line breaks.
    pub no_whitespace: bool,
    /// Indent with two spaces instead of a tab.
    pub indent_with_spaces: bool,
}

/// Options shared by every generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// C++ header extension.
    pub header_ext: String,
    /// C++ source extension.
    pub source_ext: String,
    /// `a::b` namespace wrapping generated C++ classes.
    pub namespace: String,
    /// Run the per-form collection passes on worker threads.
    pub parallel_collection: bool,
    pub xrc: XrcOptions,
    /// Directory header and XPM images are included relative to.
    pub art_directory: String,
    /// Languages the project driver generates.
    pub languages: Vec<GenLang>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            header_ext: ".h".to_string(),
            source_ext: ".cpp".to_string(),
            namespace: String::new(),
            parallel_collection: true,
            xrc: XrcOptions::default(),
            art_directory: String::new(),
            languages: vec![GenLang::Cpp],
        }
    }
}

impl GenerationOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Options generating every language.
    pub fn all_languages() -> Self {
        Self {
            languages: GenLang::ALL.to_vec(),
            ..Self::default()
        }
    }

    /// Namespace components, outermost first.
    pub fn namespaces(&self) -> Vec<&str> {
        self.namespace
            .split("::")
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let options = GenerationOptions::from_json(r#"{ "namespace": "app::ui" }"#).unwrap();
        assert_eq!(options.header_ext, ".h");
        assert!(options.parallel_collection);
        assert_eq!(options.namespaces(), vec!["app", "ui"]);
        assert_eq!(options.languages, vec![GenLang::Cpp]);
    }

    #[test]
    fn test_languages_and_xrc() {
        let json = r#"{
            "languages": ["python", "xrc"],
            "xrc": { "add_comments": true },
            "parallel_collection": false
        }"#;
        let options = GenerationOptions::from_json(json).unwrap();
        assert_eq!(options.languages, vec![GenLang::Python, GenLang::Xrc]);
        assert!(options.xrc.add_comments);
        assert!(!options.xrc.no_whitespace);
        assert!(!options.parallel_collection);
    }

    #[test]
    fn test_invalid_json() {
        assert!(GenerationOptions::from_json("{ languages: 1 }").is_err());
    }
}
