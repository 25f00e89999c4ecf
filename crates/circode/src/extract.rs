//! Ring bit extraction: sample the three concentric data rings around the
//! anchor center and threshold each arc segment into a bit.
//!
//! Each segment is sampled over a small radial × angular neighborhood
//! around its nominal position rather than at a single pixel; averaging
//! over the neighborhood trades precision for robustness against camera
//! noise, motion blur and anchor-radius estimation error.

use crate::anchor::AnchorSet;
use crate::frame::FrameView;

/// Total bits in the wire word.
pub const BIT_COUNT: usize = 48;
/// Leading payload bits (5 bytes).
pub const DATA_BITS: usize = 40;
/// Trailing checksum bits (1 byte).
pub const CHECKSUM_BITS: usize = 8;

/// Geometry and sampling neighborhood of one data ring.
#[derive(Debug, Clone, Copy)]
pub struct RingSpec {
    /// Ring radius as a fraction of the anchor-ring radius.
    pub radius_frac: f32,
    /// Number of arc segments (bits) on this ring.
    pub segments: u32,
    /// Radial sampling reach around the nominal radius (pixels).
    pub radial_reach: i32,
    /// Radial sampling step (pixels).
    pub radial_step: i32,
    /// Angular sampling reach around the segment center (degrees).
    pub angular_reach: i32,
    /// Angular sampling step (degrees).
    pub angular_step: i32,
}

/// Inner, middle and outer data rings, in wire-word bit order.
pub const RINGS: [RingSpec; 3] = [
    RingSpec {
        radius_frac: 0.42,
        segments: 8,
        radial_reach: 8,
        radial_step: 2,
        angular_reach: 20,
        angular_step: 5,
    },
    RingSpec {
        radius_frac: 0.58,
        segments: 16,
        radial_reach: 6,
        radial_step: 2,
        angular_reach: 10,
        angular_step: 5,
    },
    RingSpec {
        radius_frac: 0.75,
        segments: 24,
        radial_reach: 5,
        radial_step: 2,
        angular_reach: 6,
        angular_step: 3,
    },
];

/// Configuration for ring sampling.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Luminance below this value counts as a dark sample. Default: 128.
    pub bit_threshold: f32,
    /// Minimum dark fraction of a segment's samples for bit 1. Default: 0.4.
    pub min_dark_fraction: f32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            bit_threshold: 128.0,
            min_dark_fraction: 0.4,
        }
    }
}

/// The 48-bit wire word: 40 payload bits followed by 8 checksum bits, ring
/// order inner → middle → outer, ascending segment angle within each ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitString {
    bits: [bool; BIT_COUNT],
}

impl BitString {
    pub fn from_bits(bits: [bool; BIT_COUNT]) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The leading 40 payload bits.
    pub fn data_bits(&self) -> &[bool] {
        &self.bits[..DATA_BITS]
    }

    /// The trailing 8 checksum bits.
    pub fn checksum_bits(&self) -> &[bool] {
        &self.bits[DATA_BITS..]
    }
}

/// Sample all three rings around the anchor center.
///
/// Returns `None` if the collected bit count is not exactly 48 — with the
/// fixed ring table that cannot happen, but the wire contract is checked
/// rather than assumed.
pub fn extract_bits(
    frame: &FrameView<'_>,
    anchors: &AnchorSet,
    config: &ExtractConfig,
) -> Option<BitString> {
    let mut bits = Vec::with_capacity(BIT_COUNT);
    for ring in &RINGS {
        let nominal_r = anchors.radius * ring.radius_frac;
        let seg_step = 360.0 / ring.segments as f32;
        for seg in 0..ring.segments {
            let center_deg = seg as f32 * seg_step;
            bits.push(segment_bit(
                frame, anchors.cx, anchors.cy, nominal_r, center_deg, ring, config,
            ));
        }
    }

    if bits.len() != BIT_COUNT {
        tracing::warn!("ring sampling produced {} bits, expected {}", bits.len(), BIT_COUNT);
        return None;
    }
    let mut out = [false; BIT_COUNT];
    out.copy_from_slice(&bits);
    Some(BitString { bits: out })
}

/// Threshold one arc segment into a bit.
///
/// Out-of-frame sample points are skipped; the dark fraction divides by the
/// in-bounds count, and a segment with no in-bounds samples reads 0.
fn segment_bit(
    frame: &FrameView<'_>,
    cx: f32,
    cy: f32,
    nominal_r: f32,
    center_deg: f32,
    ring: &RingSpec,
    config: &ExtractConfig,
) -> bool {
    let mut dark = 0u32;
    let mut total = 0u32;

    let mut dr = -ring.radial_reach;
    while dr <= ring.radial_reach {
        let r = nominal_r + dr as f32;
        let mut da = -ring.angular_reach;
        while da <= ring.angular_reach {
            let theta = (center_deg + da as f32).to_radians();
            let x = (cx + r * theta.cos()).round() as i32;
            let y = (cy + r * theta.sin()).round() as i32;
            if frame.contains(x, y) {
                total += 1;
                if frame.brightness(x as u32, y as u32) < config.bit_threshold {
                    dark += 1;
                }
            }
            da += ring.angular_step;
        }
        dr += ring.radial_step;
    }

    total > 0 && (dark as f32 / total as f32) > config.min_dark_fraction
}
