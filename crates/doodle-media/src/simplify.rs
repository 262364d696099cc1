//! Grayscale + contrast preprocessing for the guess pipeline.
//!
//! The remote model sees a flattened, high-contrast version of the
//! drawing: colour is averaged away and strokes are pushed apart from the
//! background.

use tracing::debug;

use crate::data_uri::{validate_image_data_uri, DataUri, ImageMime, MIN_PAYLOAD_LEN};
use crate::drawing::DrawingImage;
use crate::error::{MediaError, MediaResult};

/// Contrast factor applied after grayscale conversion.
pub const CONTRAST_FACTOR: f32 = 1.5;

const CHANNEL_MIDPOINT: f32 = 127.5;

/// Replace R, G and B with their unweighted mean. Alpha is untouched.
pub fn grayscale_in_place(image: &mut DrawingImage) {
    for px in image.pixels_mut() {
        let avg = channel_average(px);
        px[0] = avg;
        px[1] = avg;
        px[2] = avg;
    }
}

/// Scale every colour channel away from the midpoint by `factor`.
pub fn contrast_in_place(image: &mut DrawingImage, factor: f32) {
    for px in image.pixels_mut() {
        for c in &mut px[..3] {
            *c = contrast_channel(*c, factor);
        }
    }
}

/// Preprocess a data-URI drawing into a grayscale, contrast-enhanced PNG
/// data URI.
///
/// Fails with [`MediaError::TooSmall`] before decoding when the payload is
/// shorter than [`MIN_PAYLOAD_LEN`].
pub fn simplify_data_uri(input: &str) -> MediaResult<DataUri> {
    let uri = DataUri::parse(input)?;
    uri.ensure_min_len(MIN_PAYLOAD_LEN)?;

    let bytes = uri.decode()?;
    let mut image = DrawingImage::decode(&bytes)
        .map_err(|e| MediaError::preprocess(format!("Failed to decode drawing: {e}")))?;

    if image.is_empty() {
        return Err(MediaError::preprocess("Drawing has no pixels"));
    }

    grayscale_in_place(&mut image);
    contrast_in_place(&mut image, CONTRAST_FACTOR);

    let processed = DataUri::encode(ImageMime::Png, &image.encode_png()?);
    validate_image_data_uri(&processed.to_string())?;

    debug!(
        width = image.width(),
        height = image.height(),
        input_len = uri.payload().len(),
        output_len = processed.payload().len(),
        "Drawing simplified"
    );

    Ok(processed)
}

/// Rounded mean of the R, G and B channels.
pub(crate) fn channel_average(px: &[u8]) -> u8 {
    let sum = px[0] as u16 + px[1] as u16 + px[2] as u16;
    ((sum + 1) / 3) as u8
}

fn contrast_channel(value: u8, factor: f32) -> u8 {
    let scaled = (value as f32 - CHANNEL_MIDPOINT) * factor + CHANNEL_MIDPOINT;
    scaled.round().clamp(0.0, 255.0) as u8
}
