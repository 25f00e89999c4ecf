//! circode — pure-Rust decoder for circular optical codes.
//!
//! The code stores 5 bytes of text as binary arc segments on three
//! concentric rings, surrounded by a ring of dark anchor dots. Decoding a
//! still RGBA frame runs a strictly ordered pipeline:
//!
//! 1. **Anchor** – grid scan for dark marker dots, radius-band grouping,
//!    center and radius estimation.
//! 2. **Extract** – sample the three data rings around the estimated
//!    center into a 48-bit wire word.
//! 3. **Codec** – XOR checksum validation, printable-ASCII text
//!    reconstruction.
//!
//! Every stage signals failure by returning `None`; an absent or corrupt
//! code is the expected per-frame outcome, never an error. The pipeline is
//! synchronous and stateless across calls, so the caller's capture loop can
//! invoke it once per sampled frame without any cleanup between frames.
//!
//! # Public API
//! - [`Decoder`] as the primary entry point
//! - [`FrameView`] for zero-copy access to a caller-owned RGBA buffer
//! - [`DecodeConfig`] for tuning the stage parameters

pub mod anchor;
pub mod codec;
pub mod decode;
pub mod decoder;
pub mod extract;
pub mod frame;

#[cfg(test)]
pub(crate) mod test_utils;

pub use anchor::{find_anchors, AnchorConfig, AnchorPoint, AnchorSet};
pub use codec::{decode_text, pack_bytes, verify_checksum};
pub use decode::{decode_frame, CodeKind, DecodeConfig, DecodeResult};
pub use decoder::Decoder;
pub use extract::{extract_bits, BitString, ExtractConfig, RingSpec, BIT_COUNT, DATA_BITS, RINGS};
pub use frame::FrameView;
