//! Canvas preprocessing for the sketch classifier.
//!
//! The classifier was trained on bright strokes over a dark field at
//! 28x28, so the canvas is shrunk, flattened to gray and inverted.

use image::imageops::{self, FilterType};

use crate::drawing::DrawingImage;
use crate::error::{MediaError, MediaResult};
use crate::simplify::channel_average;

/// Side length of the classifier input.
pub const CLASSIFIER_INPUT_SIZE: u32 = 28;

/// Produce the 28x28 inverted grayscale canvas the classifier expects.
///
/// Each output pixel is `255 - avg(R, G, B)` on all three colour channels
/// with alpha forced to 255.
pub fn prepare_for_classifier(canvas: &DrawingImage) -> MediaResult<DrawingImage> {
    if canvas.is_empty() {
        return Err(MediaError::preprocess("Canvas has no pixels"));
    }

    let mut resized = resize_square(canvas, CLASSIFIER_INPUT_SIZE)?;
    invert_grayscale_in_place(&mut resized);
    Ok(resized)
}

/// Replace every pixel with its inverted gray level at full opacity.
pub fn invert_grayscale_in_place(image: &mut DrawingImage) {
    for px in image.pixels_mut() {
        let v = 255 - channel_average(px);
        px.copy_from_slice(&[v, v, v, 255]);
    }
}

fn resize_square(canvas: &DrawingImage, size: u32) -> MediaResult<DrawingImage> {
    if canvas.width() == size && canvas.height() == size {
        return Ok(canvas.clone());
    }

    let buffer = canvas.clone().into_rgba_image()?;
    let resized = imageops::resize(&buffer, size, size, FilterType::Triangle);
    Ok(DrawingImage::from(resized))
}
