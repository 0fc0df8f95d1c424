//! Media file value object

use std::fmt;
use std::path::Path;

/// Fallback MIME type for unknown extensions
pub const OCTET_STREAM: &str = "application/octet-stream";

/// The two kinds of binary input a user can attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }

    /// MIME prefix a file must carry to be accepted as this kind
    pub const fn mime_prefix(&self) -> &'static str {
        match self {
            Self::Image => "image/",
            Self::Audio => "audio/",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declare a MIME type from a file name's extension
pub fn mime_type_for_path(path: impl AsRef<Path>) -> &'static str {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("webm") => "audio/webm",
        Some("m4a") => "audio/mp4",
        _ => OCTET_STREAM,
    }
}

/// A named binary blob with a declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    name: String,
    mime_type: String,
    data: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Build a media file for bytes read from `path`, declaring the MIME type
    /// from its extension.
    pub fn from_path_bytes(path: impl AsRef<Path>, data: Vec<u8>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self::new(name, mime_type_for_path(path), data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the declared MIME type is acceptable for `kind`
    pub fn is_kind(&self, kind: MediaKind) -> bool {
        self.mime_type
            .to_ascii_lowercase()
            .starts_with(kind.mime_prefix())
    }

    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    pub fn preview(&self, kind: MediaKind) -> MediaPreview {
        MediaPreview {
            kind,
            name: self.name.clone(),
            size: self.human_readable_size(),
        }
    }
}

/// Cosmetic feedback shown after a successful selection. Not part of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPreview {
    pub kind: MediaKind,
    pub name: String,
    pub size: String,
}
