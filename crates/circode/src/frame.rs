//! Borrowed RGBA frame view and luminance sampling.

use image::RgbaImage;

/// Immutable view of one RGBA8 video frame.
///
/// The buffer is row-major, 4 bytes per pixel (R, G, B, A), no padding.
/// The view borrows the caller's bytes for the duration of one decode call
/// and never retains or mutates them.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Wrap a raw RGBA8 buffer.
    ///
    /// Returns `None` unless both dimensions are non-zero and
    /// `data.len() == width * height * 4`.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// View the pixel data of an [`image::RgbaImage`].
    pub fn from_rgba_image(img: &'a RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            data: img.as_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Mean of the R, G and B channels at `(x, y)`, in [0, 255].
    ///
    /// Alpha is ignored. Coordinates must lie inside the frame; both the
    /// anchor scan and the ring sampler pre-filter with [`Self::contains`].
    #[inline]
    pub fn brightness(&self, x: u32, y: u32) -> f32 {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 3];
        (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0
    }

    /// `true` when `(x, y)` lies inside the frame.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}
