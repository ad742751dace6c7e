use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::null_as_default;

/// Banner text after a successful upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Portfolio uploaded successfully!";

/// A file picked by the user, held in memory until it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk, keeping only its final path component as the name.
    pub fn from_path(path: &std::path::Path) -> Result<Self, crate::errors::CoreError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }

    /// Size in megabytes with two decimals (e.g., "1.25 MB").
    #[must_use]
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.bytes.len() as f64 / 1024.0 / 1024.0)
    }

    /// Best-effort MIME type: magic bytes first, then the file extension.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        sniff_mime(&self.bytes).unwrap_or_else(|| mime_from_extension(&self.file_name))
    }
}

/// Local preview computed on selection, independent of the upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePreview {
    pub file_name: String,
    pub mime_type: &'static str,
    pub size_label: String,
    /// Only images get a visual preview
    pub is_image: bool,
}

impl FilePreview {
    pub fn of(file: &UploadFile) -> Self {
        let mime_type = file.mime_type();
        Self {
            file_name: file.file_name.clone(),
            mime_type,
            size_label: file.size_label(),
            is_image: mime_type.starts_with("image/"),
        }
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", "application/pdf"),
    ];
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, mime)| *mime)
}

fn mime_from_extension(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Response of `POST /portfolio/upload-portfolio`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioUploadResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    /// Raw OCR output, ticker → quantity
    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted_data: serde_json::Map<String, serde_json::Value>,

    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Outcome banner of the last upload; replaced on every attempt and cleared
/// whenever a new file is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadStatus {
    pub success: bool,
    pub message: String,
    pub data: Option<PortfolioUploadResponse>,
}

impl UploadStatus {
    pub fn succeeded(data: PortfolioUploadResponse) -> Self {
        Self {
            success: true,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            data: Some(data),
        }
    }

    pub fn failed(reason: &str) -> Self {
        Self {
            success: false,
            message: format!("Upload failed: {reason}"),
            data: None,
        }
    }

    /// Extracted assets, empty on failure.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        self.data.as_ref().map(|d| d.assets.as_slice()).unwrap_or(&[])
    }
}

/// Upload workflow state.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    NoFile,
    FileSelected,
    Uploading { ticket: uuid::Uuid },
    Succeeded(UploadStatus),
    Failed(UploadStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_png_regardless_of_extension() {
        let file = UploadFile::new("statement.bin", b"\x89PNG\r\n\x1a\nrest".to_vec());
        assert_eq!(file.mime_type(), "image/png");
    }

    #[test]
    fn sniffs_webp() {
        let file = UploadFile::new("x", b"RIFF\0\0\0\0WEBPVP8 ".to_vec());
        assert_eq!(file.mime_type(), "image/webp");
    }

    #[test]
    fn falls_back_to_extension() {
        let file = UploadFile::new("Scan.JPG", b"not really".to_vec());
        assert_eq!(file.mime_type(), "image/jpeg");
    }

    #[test]
    fn unknown_is_octet_stream() {
        let file = UploadFile::new("notes", b"hello".to_vec());
        assert_eq!(file.mime_type(), "application/octet-stream");
    }

    #[test]
    fn size_label_two_decimals() {
        let file = UploadFile::new("a.png", vec![0u8; 1024 * 1024 + 512 * 1024]);
        assert_eq!(file.size_label(), "1.50 MB");
    }
}
