//! Shared types for staged uploads.

use std::fmt;
use std::rc::Rc;

/// Identifier of a staged file, unique for the page session.
///
/// Names are not unique (two guests' phones happily produce two
/// `IMG_0001.jpg`), so everything that needs to refer to one specific
/// staged file -- previews, partial-success reports -- uses this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl FileId {
    /// Wrap a raw id value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A file offered for staging by the file picker or a drop.
///
/// Not yet filtered: candidates may be of any MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Original filename as reported by the browser.
    pub name: String,
    /// MIME type as reported by the browser (may be empty).
    pub mime_type: String,
    /// File contents.
    pub bytes: Rc<[u8]>,
}

impl Candidate {
    /// Create a candidate from its parts.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Rc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the reported MIME type names an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }
}

/// A user-selected image held client-side, not yet submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    id: FileId,
    name: String,
    mime_type: String,
    bytes: Rc<[u8]>,
}

impl StagedFile {
    pub(crate) fn from_candidate(id: FileId, candidate: Candidate) -> Self {
        Self {
            id,
            name: candidate.name,
            mime_type: candidate.mime_type,
            bytes: candidate.bytes,
        }
    }

    #[must_use]
    pub const fn id(&self) -> FileId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// File contents. Cloning the returned `Rc` is cheap.
    #[must_use]
    pub const fn bytes(&self) -> &Rc<[u8]> {
        &self.bytes
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Whether `mime_type` is an `image/*` type.
///
/// The comparison on the top-level type is ASCII case-insensitive;
/// an empty string or a bare `image/` is not an image.
#[must_use]
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .split_once('/')
        .is_some_and(|(top, sub)| {
            top.trim().eq_ignore_ascii_case("image") && !sub.trim().is_empty()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_types_are_recognized() {
        for mime in ["image/png", "image/jpeg", "IMAGE/HEIC", "image/svg+xml", " image/webp"] {
            assert!(is_image_mime(mime), "{mime:?} should be an image type");
        }
    }

    #[test]
    fn non_image_mime_types_are_rejected() {
        let not_images = [
            "",
            "text/plain",
            "application/pdf",
            "image",
            "image/",
            "video/mp4",
            "imagex/png",
        ];
        for mime in not_images {
            assert!(!is_image_mime(mime), "{mime:?} should not be an image type");
        }
    }

    #[test]
    fn staged_file_size_is_byte_length() {
        let candidate = Candidate::new("a.png", "image/png", vec![1u8, 2, 3]);
        let staged = StagedFile::from_candidate(FileId::new(7), candidate);
        assert_eq!(staged.size(), 3);
        assert_eq!(staged.id(), FileId::new(7));
        assert_eq!(staged.name(), "a.png");
    }

    #[test]
    fn file_id_display() {
        assert_eq!(FileId::new(42).to_string(), "#42");
    }
}
