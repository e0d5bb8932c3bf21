//! Image normalisation

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::error::ThumbnailError;

/// Decodes whatever the provider returned and re-encodes it as PNG.
pub fn reencode_png(bytes: &[u8]) -> Result<Vec<u8>, ThumbnailError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| {
            debug!("Failed to guess image format: {}", err);
            ThumbnailError::InternalServerError(format!("Failed to read provider image: {err}"))
        })?;
    let format = reader.format();
    let image = reader.decode().map_err(|err| {
        debug!("Failed to decode image ({:?}): {}", format, err);
        ThumbnailError::InternalServerError(format!("Failed to decode provider image: {err}"))
    })?;
    debug!(
        "Decoded {:?} image {}x{}",
        format,
        image.width(),
        image.height()
    );

    let mut output = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|err| ThumbnailError::InternalServerError(err.to_string()))?;
    Ok(output)
}
