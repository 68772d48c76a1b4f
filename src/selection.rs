use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

const OCTET_STREAM: &str = "application/octet-stream";

/// The image the user picked, fully read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        SelectedFile {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

// Keep the payload out of debug logs.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.size())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please upload an image file (.jpg, .png, etc)")]
    NotAnImage { media_type: String },
    #[error("{name} is {} KB, larger than the {} KB upload limit", .size / 1024, .max / 1024)]
    TooLarge { name: String, size: u64, max: u64 },
    #[error("Could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },
    #[error("Please upload an image first")]
    NoFile,
}

/// Reads a file chosen through the dialog or dropped onto the window.
/// Files over `max_bytes` are rejected from their metadata, before any read.
pub async fn load(path: PathBuf, max_bytes: u64) -> Result<SelectedFile, SelectionError> {
    let unreadable = |e: std::io::Error| SelectionError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let size = tokio::fs::metadata(&path).await.map_err(unreadable)?.len();
    if size > max_bytes {
        return Err(SelectionError::TooLarge {
            name: display_name(&path),
            size,
            max: max_bytes,
        });
    }

    let bytes = tokio::fs::read(&path).await.map_err(unreadable)?;

    let name = display_name(&path);
    let media_type = media_type_for(&path, &bytes);

    tracing::debug!("Loaded {} ({}, {} bytes)", name, media_type, bytes.len());
    Ok(SelectedFile::new(name, media_type, bytes))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Declared media type: from the extension first, then by sniffing the
/// header for files without a recognised extension.
pub fn media_type_for(path: &Path, bytes: &[u8]) -> String {
    if let Some(mime) = mime_guess::from_path(path).first() {
        return mime.essence_str().to_string();
    }

    image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| OCTET_STREAM.to_string())
}

/// Checks a candidate before it is allowed anywhere near the workflow.
pub fn validate(file: &SelectedFile, max_bytes: u64) -> Result<(), SelectionError> {
    if !file.is_image() {
        return Err(SelectionError::NotAnImage {
            media_type: file.media_type.clone(),
        });
    }

    if file.size() > max_bytes {
        return Err(SelectionError::TooLarge {
            name: file.name.clone(),
            size: file.size(),
            max: max_bytes,
        });
    }

    Ok(())
}
