//! Uploaded file type.

use bytes::Bytes;
use mime::Mime;
use std::path::Path;

/// A file handed over by the upload layer.
///
/// The multipart decoder is an external collaborator; by the time bytes
/// reach this crate they are already assembled into one of these.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name, as sent by the client.
    pub name: Option<String>,
    /// Declared MIME type.
    pub content_type: Option<Mime>,
    /// File data.
    pub data: Bytes,
}

impl UploadedFile {
    /// Create from raw bytes with a name, guessing the content type from
    /// the file name when the client declared none.
    pub fn from_bytes(data: impl Into<Bytes>, name: impl Into<String>) -> Self {
        let data = data.into();
        let name = name.into();
        let content_type = mime_guess::from_path(&name).first();

        Self {
            name: Some(name),
            content_type,
            data,
        }
    }

    /// Get the file name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the content type as a string, defaulting to octet-stream.
    pub fn content_type_str(&self) -> String {
        self.content_type
            .as_ref()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string())
    }

    /// Get the file extension.
    pub fn extension(&self) -> Option<String> {
        self.name.as_ref().and_then(|n| {
            Path::new(n)
                .extension()
                .map(|e| e.to_string_lossy().to_string())
        })
    }

    /// Get the file size.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Check if the file has an image MIME type.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_ref()
            .map(|ct| ct.type_() == mime::IMAGE)
            .unwrap_or(false)
    }

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Set the content type explicitly.
    pub fn with_content_type(mut self, content_type: Mime) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_guesses_content_type() {
        let file = UploadedFile::from_bytes(vec![1u8, 2, 3], "photo.jpg");
        assert_eq!(file.name(), Some("photo.jpg"));
        assert_eq!(file.content_type_str(), "image/jpeg");
        assert_eq!(file.extension().as_deref(), Some("jpg"));
        assert_eq!(file.size(), 3);
        assert!(file.is_image());
    }

    #[test]
    fn test_unknown_extension_defaults_to_octet_stream() {
        let file = UploadedFile::from_bytes(vec![0u8; 4], "blob.weird-ext");
        assert_eq!(file.content_type_str(), "application/octet-stream");
        assert!(!file.is_image());
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let file = UploadedFile::from_bytes(vec![0u8; 4], "data.bin")
            .with_content_type("image/png".parse().unwrap());
        assert!(file.is_image());
        assert_eq!(file.content_type_str(), "image/png");
    }
}
