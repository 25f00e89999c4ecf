//! Decode orchestration: anchors → bits → checksum → text.
//!
//! Every stage signals failure by returning `None`; a frame without a
//! decodable code is the common per-frame outcome, not an error. A
//! `catch_unwind` boundary converts any unexpected internal fault into a
//! logged `None`, so the caller's capture loop can never be crashed from
//! inside the pipeline.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::anchor::{find_anchors, AnchorConfig};
use crate::codec::{decode_text, verify_checksum};
use crate::extract::{extract_bits, ExtractConfig};
use crate::frame::FrameView;

/// Top-level decoding configuration.
#[derive(Debug, Clone, Default)]
pub struct DecodeConfig {
    pub anchor: AnchorConfig,
    pub extract: ExtractConfig,
}

/// Code family of a decode result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Circular,
}

/// A successfully decoded circular code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeResult {
    /// Reconstructed payload text. May be empty when every payload byte
    /// fell outside printable ASCII; a validated empty decode still counts
    /// as success.
    pub text: String,
    #[serde(rename = "type")]
    pub kind: CodeKind,
    /// Mean darkness confidence of the detected anchors, in [0, 1].
    pub confidence: f32,
}

/// Decode one frame.
///
/// Returns `None` when no valid circular code is present — missing
/// anchors, a malformed bit string, or a checksum mismatch all surface the
/// same way, as does any unexpected internal fault.
pub fn decode_frame(frame: &FrameView<'_>, config: &DecodeConfig) -> Option<DecodeResult> {
    match panic::catch_unwind(AssertUnwindSafe(|| decode_stages(frame, config))) {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("internal fault while decoding frame; dropping frame");
            None
        }
    }
}

fn decode_stages(frame: &FrameView<'_>, config: &DecodeConfig) -> Option<DecodeResult> {
    let anchors = find_anchors(frame, &config.anchor)?;
    tracing::debug!(
        "{} anchors, center ({:.1}, {:.1}), radius {:.1}",
        anchors.anchors.len(),
        anchors.cx,
        anchors.cy,
        anchors.radius
    );

    let bits = extract_bits(frame, &anchors, &config.extract)?;

    if !verify_checksum(bits.data_bits(), bits.checksum_bits()) {
        tracing::debug!("checksum mismatch");
        return None;
    }

    let text = decode_text(bits.data_bits());
    let confidence = anchors.mean_confidence();
    tracing::info!("decoded circular code {:?} (confidence {:.2})", text, confidence);
    Some(DecodeResult {
        text,
        kind: CodeKind::Circular,
        confidence,
    })
}
