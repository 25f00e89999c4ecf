//! Shared test utilities: synthetic circular-code frames.
//!
//! The painter exists for tests only — the product has no encoder. Two
//! darkness levels keep the stages independent: anchor dots sit well below
//! the anchor threshold (120), while data arcs sit between 120 and the bit
//! threshold (128), so ring paint can never masquerade as an anchor dot.

use crate::extract::{BIT_COUNT, RINGS};

pub(crate) const BG: u8 = 230;
pub(crate) const DOT: u8 = 10;
pub(crate) const ARC: u8 = 124;

const DOT_RADIUS: f32 = 6.0;
/// Radial half-width of the painted ring bands, comfortably covering the
/// extractor's radial sampling reach plus radius-estimation slop.
const BAND_HALF: [f32; 3] = [10.0, 8.0, 8.0];
/// Grid-scan margin matching `AnchorConfig::default()`.
const SCAN_MARGIN: u32 = 15;

/// A uniform RGBA frame with every channel at `value` and alpha 255.
pub(crate) fn uniform_frame(width: u32, height: u32, value: u8) -> Vec<u8> {
    let mut data = vec![value; (width * height * 4) as usize];
    for px in data.chunks_exact_mut(4) {
        px[3] = 255;
    }
    data
}

/// Pack a 5-byte payload and its XOR checksum into wire bit order
/// (MSB first, payload bytes then checksum byte).
pub(crate) fn wire_bits(payload: &[u8; 5]) -> [bool; BIT_COUNT] {
    let checksum = payload.iter().fold(0u8, |acc, &b| acc ^ b);
    let mut bits = [false; BIT_COUNT];
    for (i, byte) in payload.iter().chain(std::iter::once(&checksum)).enumerate() {
        for k in 0..8 {
            bits[i * 8 + k] = (byte >> (7 - k)) & 1 == 1;
        }
    }
    bits
}

/// Snap a coordinate onto the anchor-scan lattice so a painted dot center
/// coincides with exactly one grid point.
fn snap(v: f32, step: u32) -> f32 {
    let m = SCAN_MARGIN as f32;
    let s = step as f32;
    m + ((v - m) / s).round() * s
}

/// Paint a complete synthetic code frame: bright background, `n_dots`
/// anchor dots near a circle of `anchor_radius` around `(cx, cy)`, and the
/// three data rings for `bits`.
///
/// Dot centers are snapped onto the scan lattice, so with the default
/// config each dot contributes exactly one candidate spot.
pub(crate) fn draw_code_frame(
    width: u32,
    height: u32,
    cx: f32,
    cy: f32,
    anchor_radius: f32,
    n_dots: usize,
    bits: &[bool; BIT_COUNT],
) -> Vec<u8> {
    let mut data = uniform_frame(width, height, BG);
    let step = (width.min(height) / 150).max(2);

    let dot_centers: Vec<(f32, f32)> = (0..n_dots)
        .map(|i| {
            let theta = (i as f32 * 360.0 / n_dots as f32 + 15.0).to_radians();
            (
                snap(cx + anchor_radius * theta.cos(), step),
                snap(cy + anchor_radius * theta.sin(), step),
            )
        })
        .collect();

    for y in 0..height {
        for x in 0..width {
            let (fx, fy) = (x as f32, y as f32);

            let mut value = None;
            if dot_centers
                .iter()
                .any(|&(dx, dy)| (fx - dx).hypot(fy - dy) < DOT_RADIUS)
            {
                value = Some(DOT);
            } else {
                let d = (fx - cx).hypot(fy - cy);
                let mut bit_base = 0usize;
                for (ring, &half) in RINGS.iter().zip(&BAND_HALF) {
                    let nominal_r = anchor_radius * ring.radius_frac;
                    if (d - nominal_r).abs() <= half {
                        let seg_step = 360.0 / ring.segments as f32;
                        let mut ang = (fy - cy).atan2(fx - cx).to_degrees();
                        if ang < 0.0 {
                            ang += 360.0;
                        }
                        let seg = (ang / seg_step).round() as u32 % ring.segments;
                        if bits[bit_base + seg as usize] {
                            value = Some(ARC);
                        }
                    }
                    bit_base += ring.segments as usize;
                }
            }

            if let Some(v) = value {
                let idx = ((y * width + x) * 4) as usize;
                data[idx] = v;
                data[idx + 1] = v;
                data[idx + 2] = v;
            }
        }
    }
    data
}
