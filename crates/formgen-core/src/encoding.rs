//! Property-string encodings shared by every generator.
//!
//! Three encodings are fixed by the project format:
//!
//! - images and animations: `Type;Path[;Size]`
//! - identifiers: `identifier` or `identifier=literal`
//! - platform restrictions: `|`-separated platform names, where
//!   [`PLATFORMS_ALL`] means the contribution is unconditional

use crate::error::{CoreError, Result};

/// The platform selector that means "every platform".
pub const PLATFORMS_ALL: &str = "Windows|Unix|Mac";

/// Prefix of the stock identifiers provided by wxWidgets itself.
pub const BUILTIN_ID_PREFIX: &str = "wxID_";

/// How an image property is stored or referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageKind {
    /// Compressed into the generated source.
    Embed,
    /// Looked up through `wxArtProvider` at runtime.
    Art,
    /// An XPM file pulled in with `#include`.
    Xpm,
    /// A generated header with the image data.
    Header,
    /// A compressed SVG embedded in the generated source.
    Svg,
}

impl ImageKind {
    pub fn parse(s: &str) -> Option<ImageKind> {
        match s {
            "Embed" => Some(ImageKind::Embed),
            "Art" => Some(ImageKind::Art),
            "XPM" => Some(ImageKind::Xpm),
            "Header" => Some(ImageKind::Header),
            "SVG" => Some(ImageKind::Svg),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Embed => "Embed",
            ImageKind::Art => "Art",
            ImageKind::Xpm => "XPM",
            ImageKind::Header => "Header",
            ImageKind::Svg => "SVG",
        }
    }

    /// Kinds whose data ends up inside the generated source file.
    pub fn is_embedded(self) -> bool {
        matches!(self, ImageKind::Embed | ImageKind::Svg)
    }
}

/// A parsed `Type;Path[;Size]` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescription {
    pub kind: ImageKind,
    /// File path, or `art_id|client` for [`ImageKind::Art`].
    pub path: String,
    pub size: Option<(i32, i32)>,
}

impl ImageDescription {
    /// Parse an image or animation property value.
    ///
    /// Parts are trimmed. Older projects stored a fourth field, which is ignored.
    pub fn parse(description: &str) -> Result<Self> {
        let invalid = |reason: &str| CoreError::InvalidImageDescription {
            description: description.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = description.split(';').map(str::trim);
        let kind_str = parts.next().unwrap_or_default();
        let kind = ImageKind::parse(kind_str)
            .ok_or_else(|| invalid(&format!("unknown image type '{kind_str}'")))?;

        let path = parts.next().unwrap_or_default();
        if path.is_empty() {
            return Err(invalid("missing path"));
        }

        let size = parts.next().and_then(parse_size);

        Ok(Self {
            kind,
            path: path.to_string(),
            size,
        })
    }

    /// For [`ImageKind::Art`]: the art id and optional client.
    pub fn art_parts(&self) -> (&str, Option<&str>) {
        match self.path.split_once('|') {
            Some((id, client)) => (id, Some(client)),
            None => (self.path.as_str(), None),
        }
    }

    /// True when the path names an XPM file.
    pub fn is_xpm_file(&self) -> bool {
        self.path.to_ascii_lowercase().ends_with(".xpm")
    }

    /// True when the path names a Windows `.ani` animation.
    pub fn is_ani_file(&self) -> bool {
        self.path.to_ascii_lowercase().contains(".ani")
    }
}

fn parse_size(s: &str) -> Option<(i32, i32)> {
    let s = s.trim_start_matches('[').trim_end_matches(']');
    let (w, h) = s.split_once(',')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// A parsed identifier property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdValue {
    /// A bare identifier that goes into the generated enumeration.
    Enum(String),
    /// `name=value`, declared as a constant.
    Const { name: String, value: String },
}

impl IdValue {
    /// Parse an identifier property. Returns `None` for empty values.
    pub fn parse(value: &str) -> Option<IdValue> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match value.split_once('=') {
            Some((name, literal)) => Some(IdValue::Const {
                name: name.trim().to_string(),
                value: literal.trim().to_string(),
            }),
            None => Some(IdValue::Enum(value.to_string())),
        }
    }

    /// The identifier name without any assigned literal.
    pub fn name(&self) -> &str {
        match self {
            IdValue::Enum(name) => name,
            IdValue::Const { name, .. } => name,
        }
    }

    /// True for stock `wxID_*` identifiers.
    pub fn is_builtin(&self) -> bool {
        self.name().starts_with(BUILTIN_ID_PREFIX)
    }
}

/// True for ids the generated code has to declare itself.
pub fn is_custom_id(value: &str) -> bool {
    !value.trim().is_empty() && !value.trim().starts_with(BUILTIN_ID_PREFIX)
}

/// A single target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Windows,
    Unix,
    Mac,
}

impl Platform {
    /// Platforms named in a selector, in the order they appear. Unknown names are
    /// skipped.
    pub fn from_selector(selector: &str) -> Vec<Platform> {
        selector
            .split('|')
            .filter_map(|part| match part.trim() {
                "Windows" => Some(Platform::Windows),
                "Unix" => Some(Platform::Unix),
                "Mac" => Some(Platform::Mac),
                _ => None,
            })
            .collect()
    }

    /// The preprocessor symbol a C++ compiler defines for this platform.
    pub fn cpp_define(self) -> &'static str {
        match self {
            Platform::Windows => "__WINDOWS__",
            Platform::Unix => "__UNIX__",
            Platform::Mac => "__WXOSX__",
        }
    }

    /// The `wx.Platform` value used by the Python bindings.
    pub fn python_platform(self) -> &'static str {
        match self {
            Platform::Windows => "__WXMSW__",
            Platform::Unix => "__WXGTK__",
            Platform::Mac => "__WXMAC__",
        }
    }

    /// Fragment matched against `RUBY_PLATFORM` and Perl's `$^O`.
    pub fn os_pattern(self) -> &'static str {
        match self {
            Platform::Windows => "mswin|mingw",
            Platform::Unix => "linux|bsd",
            Platform::Mac => "darwin",
        }
    }
}
