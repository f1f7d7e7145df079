use std::path::Path;

use bytes::Bytes;

use crate::error::FileReadError;

/// A file selected for upload: display name, raw content and MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    content: Bytes,
    content_type: String,
}

impl FileHandle {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// Build a handle whose content type is guessed from the file name.
    pub fn guessed(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .to_string();
        Self::new(name, content, content_type)
    }

    /// Read a file from disk. The handle is named after the path's last component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, FileReadError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await.map_err(|source| FileReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());

        log::debug!("Loaded {} ({} bytes)", name, content.len());
        Ok(Self::guessed(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
