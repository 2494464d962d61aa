//! Rasterized frame representation

use crate::utils::RenderError;

/// Rasterized frame, straight-alpha RGBA with 8 bits per channel
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    index: i64,
}

impl Frame {
    /// Create a frame from RGBA data, checking the buffer length
    pub fn from_rgba(buffer: Vec<u8>, width: u32, height: u32, index: i64) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        if buffer.len() != expected {
            return Err(RenderError::InvalidBufferSize {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self {
            buffer,
            width,
            height,
            index,
        })
    }

    /// Create an empty frame (transparent)
    pub fn empty(width: u32, height: u32, index: i64) -> Self {
        Self {
            buffer: vec![0; width as usize * height as usize * 4],
            width,
            height,
            index,
        }
    }

    /// Get frame buffer data
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Take ownership of the buffer
    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    /// Get frame width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get frame height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame index on the composition timeline
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Get stride (bytes per row)
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// RGBA value at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride() + x as usize * 4;
        self.buffer
            .get(offset..offset + 4)
            .and_then(|px| px.try_into().ok())
    }

    /// Check if frame is empty (all transparent)
    pub fn is_empty(&self) -> bool {
        self.buffer.chunks_exact(4).all(|pixel| pixel[3] == 0)
    }

    /// Copy into an `image` buffer
    #[cfg(feature = "image")]
    pub fn to_rgba_image(&self) -> Result<image::RgbaImage, RenderError> {
        image::RgbaImage::from_raw(self.width, self.height, self.buffer.clone()).ok_or(
            RenderError::InvalidBufferSize {
                expected: self.width as usize * self.height as usize * 4,
                actual: self.buffer.len(),
            },
        )
    }

    /// Encode as PNG at `path`
    #[cfg(feature = "image")]
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| RenderError::IOError(format!("{}: {e}", path.display())))
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("index", &self.index)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_length_is_checked() {
        assert!(Frame::from_rgba(vec![0; 16], 2, 2, 0).is_ok());
        assert!(matches!(
            Frame::from_rgba(vec![0; 15], 2, 2, 0),
            Err(RenderError::InvalidBufferSize { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn pixel_access() {
        let mut data = vec![0; 16];
        data[12..16].copy_from_slice(&[1, 2, 3, 255]);
        let frame = Frame::from_rgba(data, 2, 2, 7).unwrap();
        assert_eq!(frame.pixel(1, 1), Some([1, 2, 3, 255]));
        assert_eq!(frame.pixel(2, 0), None);
        assert!(!frame.is_empty());
        assert!(Frame::empty(3, 3, 0).is_empty());
    }
}
