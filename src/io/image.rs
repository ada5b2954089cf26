//! Image loading for classification requests.
//!
//! Images are read whole and base64-encoded (standard alphabet, padded), which is
//! the form the model expects for inline data.

use std::fs;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::classify::InlineImage;
use crate::error::AppError;

/// Guess an image MIME type from the file extension.
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => return None,
    };
    Some(mime)
}

/// Read an image file into an inline payload.
///
/// `mime_type` overrides extension-based detection; one of the two is required.
pub fn load_image(path: &Path, mime_type: Option<&str>) -> Result<InlineImage, AppError> {
    let mime_type = match mime_type {
        Some(m) => m.to_string(),
        None => mime_type_for(path)
            .ok_or_else(|| {
                AppError::new(
                    2,
                    format!(
                        "Cannot infer MIME type for '{}'. Pass --mime-type explicitly.",
                        path.display()
                    ),
                )
            })?
            .to_string(),
    };

    let bytes = fs::read(path)
        .map_err(|e| AppError::new(2, format!("Failed to read image '{}': {e}", path.display())))?;

    Ok(InlineImage {
        data: STANDARD.encode(bytes),
        mime_type,
    })
}
