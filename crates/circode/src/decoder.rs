//! High-level decoding API.
//!
//! [`Decoder`] is the primary entry point: it wraps a [`DecodeConfig`] and
//! provides convenience methods for the common input shapes. Create once,
//! decode one frame per call; the decoder holds no per-frame state, so
//! feeding it the same buffer twice yields the same result.

use image::RgbaImage;

use crate::decode::{decode_frame, DecodeConfig, DecodeResult};
use crate::frame::FrameView;

/// Primary decoding interface.
///
/// # Examples
///
/// ```no_run
/// use circode::Decoder;
/// use image::RgbaImage;
///
/// let decoder = Decoder::new();
/// let frame = RgbaImage::new(640, 480);
/// if let Some(result) = decoder.decode_image(&frame) {
///     println!("decoded {:?}", result.text);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    /// Create a decoder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: DecodeConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut DecodeConfig {
        &mut self.config
    }

    /// Decode one frame view.
    pub fn decode(&self, frame: &FrameView<'_>) -> Option<DecodeResult> {
        decode_frame(frame, &self.config)
    }

    /// Decode a raw RGBA8 buffer.
    ///
    /// Returns `None` (with a log line) when the buffer length does not
    /// match `width * height * 4`.
    pub fn decode_rgba(&self, width: u32, height: u32, data: &[u8]) -> Option<DecodeResult> {
        match FrameView::new(width, height, data) {
            Some(frame) => self.decode(&frame),
            None => {
                tracing::warn!(
                    "malformed frame buffer: {}x{} with {} bytes",
                    width,
                    height,
                    data.len()
                );
                None
            }
        }
    }

    /// Decode an [`image::RgbaImage`].
    pub fn decode_image(&self, img: &RgbaImage) -> Option<DecodeResult> {
        self.decode(&FrameView::from_rgba_image(img))
    }
}
