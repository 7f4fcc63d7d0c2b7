use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::prompt::ImageAttachment;

pub const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
pub const MAX_IMAGE_SIZE: usize = 20 * 1024 * 1024; // 20MB

/// Reads question text from a transcript file or stdin.
pub struct InputReader;

impl InputReader {
    /// Reads `path`, or stdin when `path` is `-`.
    pub fn read(path: &Path) -> Result<String> {
        if path == Path::new("-") {
            Self::read_stdin()
        } else {
            Self::read_file(path)
        }
    }

    pub fn read_file(path: &Path) -> Result<String> {
        let size = file_size(path)?;
        if size > MAX_INPUT_SIZE {
            bail!(
                "Input size ({}) exceeds maximum allowed size (1 MB).\n\n\
                 Transcripts should be a single question.",
                format_megabytes(size)
            );
        }

        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    #[allow(clippy::significant_drop_tightening)]
    pub fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(
                    "Input size ({}) exceeds maximum allowed size (1 MB).",
                    format_megabytes(buffer.len())
                );
            }
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

/// Loads a worksheet photo or screenshot for the chat request.
pub struct ImageReader;

impl ImageReader {
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &["png", "jpg", "jpeg"];

    /// Reads a PNG or JPEG file and encodes it for a `data:` URL.
    pub fn read(path: &Path) -> Result<ImageAttachment> {
        let mime_type = Self::mime_type(path)?;

        let size = file_size(path)?;
        if size > MAX_IMAGE_SIZE {
            bail!(
                "Image size ({}) exceeds maximum allowed size (20 MB).",
                format_megabytes(size)
            );
        }

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read image: {}", path.display()))?;
        if bytes.is_empty() {
            bail!("Image file is empty: {}", path.display());
        }

        tracing::debug!(path = %path.display(), bytes = bytes.len(), mime_type, "image loaded");
        Ok(ImageAttachment::new(mime_type, STANDARD.encode(bytes)))
    }

    /// MIME type from the file extension.
    pub fn mime_type(path: &Path) -> Result<&'static str> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Ok("image/png"),
            Some("jpg" | "jpeg") => Ok("image/jpeg"),
            _ => bail!(
                "Unsupported image type: {}\n\nSupported types: {}",
                path.display(),
                Self::SUPPORTED_EXTENSIONS.join(", ")
            ),
        }
    }
}

fn file_size(path: &Path) -> Result<usize> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to access file: {}", path.display()))?;
    Ok(usize::try_from(metadata.len()).unwrap_or(usize::MAX))
}

#[allow(clippy::cast_precision_loss)]
fn format_megabytes(bytes: usize) -> String {
    format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
}
