//! Anchor-dot detection: locate the ring of dark marker dots and estimate
//! the code center and radius.
//!
//! A coarse grid scan collects dark candidate spots, each scored by the
//! fraction of its 9×9 neighborhood that is also dark. Candidates are then
//! bucketed into 20 px bands by distance from their common centroid; true
//! anchor dots share a band because they lie on one circle. Each band of
//! plausible size is scored by how evenly its members are spaced in angle,
//! weighted by their mean darkness confidence, which rejects reflections
//! and texture noise that are dark but irregularly placed.

use std::collections::BTreeMap;

use crate::frame::FrameView;

/// Configuration for anchor detection.
#[derive(Debug, Clone)]
pub struct AnchorConfig {
    /// Luminance below this value counts as dark. Default: 120.
    pub dark_threshold: f32,
    /// Border (pixels) excluded from the grid scan. Default: 15.
    pub margin: u32,
    /// The scan step is `max(min_grid_step, min(w, h) / grid_divisor)`,
    /// which bounds the per-frame cost on large frames. Default: 150.
    pub grid_divisor: u32,
    /// Lower bound on the scan step (pixels). Default: 2.
    pub min_grid_step: u32,
    /// Half-width of the square neighborhood inspected around a dark grid
    /// point (4 gives 9×9). Default: 4.
    pub neighborhood: i32,
    /// Minimum dark fraction of the neighborhood for a candidate spot.
    /// Default: 0.5.
    pub min_dark_ratio: f32,
    /// Width of the distance-to-centroid bands that group candidates lying
    /// on the same ring, tolerating dot-size jitter (pixels). Default: 20.
    pub band_width: f32,
    /// Minimum member count for a band to be scored. Default: 4.
    pub min_group: usize,
    /// Maximum member count for a band to be scored. Default: 12.
    pub max_group: usize,
    /// At most this many anchors are kept, in angle order. Default: 7.
    pub max_anchors: usize,
    /// Detection fails with fewer anchors than this. Default: 4.
    pub min_anchors: usize,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            dark_threshold: 120.0,
            margin: 15,
            grid_divisor: 150,
            min_grid_step: 2,
            neighborhood: 4,
            min_dark_ratio: 0.5,
            band_width: 20.0,
            min_group: 4,
            max_group: 12,
            max_anchors: 7,
            min_anchors: 4,
        }
    }
}

/// One detected dark marker dot, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub x: f32,
    pub y: f32,
    /// Fraction of the local neighborhood classified as dark, in [0, 1].
    pub confidence: f32,
}

/// Resolved anchor-ring geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorSet {
    /// Kept anchors, sorted by angle around the center.
    pub anchors: Vec<AnchorPoint>,
    /// Center x: centroid of all candidate spots.
    pub cx: f32,
    /// Center y: centroid of all candidate spots.
    pub cy: f32,
    /// Mean distance of the kept anchors from the center.
    pub radius: f32,
}

impl AnchorSet {
    /// Mean confidence over the kept anchors.
    pub fn mean_confidence(&self) -> f32 {
        if self.anchors.is_empty() {
            return 0.0;
        }
        self.anchors.iter().map(|a| a.confidence).sum::<f32>() / self.anchors.len() as f32
    }
}

/// Detect the anchor-dot ring in a frame.
///
/// Returns `None` when fewer than `min_anchors` qualifying dark spots
/// exist or no radius band of plausible size scores.
pub fn find_anchors(frame: &FrameView<'_>, config: &AnchorConfig) -> Option<AnchorSet> {
    let (w, h) = (frame.width(), frame.height());
    if w <= 2 * config.margin || h <= 2 * config.margin {
        return None;
    }
    let step = (w.min(h) / config.grid_divisor).max(config.min_grid_step);

    let mut spots: Vec<AnchorPoint> = Vec::new();
    let mut y = config.margin;
    while y < h - config.margin {
        let mut x = config.margin;
        while x < w - config.margin {
            if frame.brightness(x, y) < config.dark_threshold {
                let ratio = dark_ratio(frame, x as i32, y as i32, config);
                if ratio > config.min_dark_ratio {
                    spots.push(AnchorPoint {
                        x: x as f32,
                        y: y as f32,
                        confidence: ratio,
                    });
                }
            }
            x += step;
        }
        y += step;
    }

    if spots.len() < config.min_anchors {
        tracing::debug!(
            "{} candidate spots, need at least {}",
            spots.len(),
            config.min_anchors
        );
        return None;
    }

    // Provisional center: centroid of every candidate spot.
    let n = spots.len() as f32;
    let cx = spots.iter().map(|s| s.x).sum::<f32>() / n;
    let cy = spots.iter().map(|s| s.y).sum::<f32>() / n;

    // Bucket by distance-to-centroid rounded to the nearest band. A BTreeMap
    // keeps the traversal deterministic, so score ties always resolve toward
    // the smaller radius band and repeated calls on the same frame agree.
    let mut bands: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, s) in spots.iter().enumerate() {
        let d = ((s.x - cx).powi(2) + (s.y - cy).powi(2)).sqrt();
        let band = (d / config.band_width).round() as i32;
        bands.entry(band).or_default().push(i);
    }

    let mut best: Option<(f32, Vec<usize>)> = None;
    for members in bands.values() {
        if members.len() < config.min_group || members.len() > config.max_group {
            continue;
        }
        let mut by_angle = members.clone();
        by_angle.sort_by(|&a, &b| {
            angle_deg(&spots[a], cx, cy).total_cmp(&angle_deg(&spots[b], cx, cy))
        });
        let score = group_score(&by_angle, &spots, cx, cy);
        match &best {
            Some((best_score, _)) if score <= *best_score => {}
            _ => best = Some((score, by_angle)),
        }
    }

    let (_, mut kept) = best?;
    kept.truncate(config.max_anchors);
    if kept.len() < config.min_anchors {
        return None;
    }

    let anchors: Vec<AnchorPoint> = kept.into_iter().map(|i| spots[i]).collect();
    let radius = anchors
        .iter()
        .map(|a| ((a.x - cx).powi(2) + (a.y - cy).powi(2)).sqrt())
        .sum::<f32>()
        / anchors.len() as f32;

    Some(AnchorSet {
        anchors,
        cx,
        cy,
        radius,
    })
}

/// Fraction of the in-bounds neighborhood around `(x, y)` below the dark
/// threshold.
fn dark_ratio(frame: &FrameView<'_>, x: i32, y: i32, config: &AnchorConfig) -> f32 {
    let mut dark = 0u32;
    let mut total = 0u32;
    for dy in -config.neighborhood..=config.neighborhood {
        for dx in -config.neighborhood..=config.neighborhood {
            let (nx, ny) = (x + dx, y + dy);
            if !frame.contains(nx, ny) {
                continue;
            }
            total += 1;
            if frame.brightness(nx as u32, ny as u32) < config.dark_threshold {
                dark += 1;
            }
        }
    }
    if total == 0 {
        0.0
    } else {
        dark as f32 / total as f32
    }
}

fn angle_deg(s: &AnchorPoint, cx: f32, cy: f32) -> f32 {
    (s.y - cy).atan2(s.x - cx).to_degrees()
}

/// Evenness-of-spacing score for an angle-sorted band: `uniformity × mean
/// confidence`, where uniformity compares the mean consecutive angular gap
/// against the 360/n spacing of an ideal anchor ring. The wraparound gap is
/// excluded — including it would make the mean identically 360/n.
fn group_score(ids: &[usize], spots: &[AnchorPoint], cx: f32, cy: f32) -> f32 {
    let n = ids.len();
    if n < 2 {
        return 0.0;
    }
    let angles: Vec<f32> = ids.iter().map(|&i| angle_deg(&spots[i], cx, cy)).collect();
    let avg_gap =
        angles.windows(2).map(|w| w[1] - w[0]).sum::<f32>() / (n - 1) as f32;
    let expected = 360.0 / n as f32;
    let uniformity = 1.0 - (avg_gap - expected).abs() / expected;
    let avg_conf = ids.iter().map(|&i| spots[i].confidence).sum::<f32>() / n as f32;
    uniformity * avg_conf
}
