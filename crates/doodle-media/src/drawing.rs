//! RGBA pixel buffer captured from a freehand sketch.

use image::{DynamicImage, RgbaImage};

use crate::error::{MediaError, MediaResult};

/// Raw RGBA drawing, mutated in place by the preprocessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl DrawingImage {
    /// Wrap raw RGBA bytes (`width * height * 4`).
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> MediaResult<Self> {
        let expected_len = width as usize * height as usize * 4;
        if data.len() != expected_len {
            return Err(MediaError::preprocess(format!(
                "Invalid image data length: expected {}, got {}",
                expected_len,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fill a canvas with one colour.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();

        Self {
            width,
            height,
            data,
        }
    }

    /// Decode a PNG or JPEG byte stream.
    pub fn decode(bytes: &[u8]) -> MediaResult<Self> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from(img.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Iterate pixels as mutable `[r, g, b, a]` chunks.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(4)
    }

    /// Iterate pixels as `[r, g, b, a]` chunks.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(4)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Convert into an `image` buffer for resizing and encoding.
    pub fn into_rgba_image(self) -> MediaResult<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| MediaError::preprocess("Failed to create image buffer"))
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> MediaResult<Vec<u8>> {
        let buffer = self.clone().into_rgba_image()?;
        let mut out = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(buffer).write_to(&mut out, image::ImageOutputFormat::Png)?;
        Ok(out.into_inner())
    }
}

impl From<RgbaImage> for DrawingImage {
    fn from(buffer: RgbaImage) -> Self {
        let (width, height) = buffer.dimensions();
        Self {
            width,
            height,
            data: buffer.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_length() {
        assert!(DrawingImage::new(2, 2, vec![0; 15]).is_err());
        assert!(DrawingImage::new(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_png_encode_decode() {
        let img = DrawingImage::filled(4, 3, [10, 20, 30, 255]);
        let png = img.encode_png().unwrap();
        let decoded = DrawingImage::decode(&png).unwrap();
        assert_eq!(decoded, img);
    }
}
