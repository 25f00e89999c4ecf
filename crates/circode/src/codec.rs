//! Wire-word codec: byte packing, XOR checksum validation and printable
//! text reconstruction.
//!
//! The 40 payload bits carry 5 bytes, most significant bit first; the 8
//! checksum bits hold the XOR of those bytes. The checksum detects
//! corruption only — it corrects nothing, and a corruption pattern whose
//! bytes XOR to the same value passes undetected.

/// Payload size of the wire word in bytes.
pub const PAYLOAD_BYTES: usize = 5;

/// Printable ASCII range kept by [`decode_text`].
const PRINTABLE: std::ops::RangeInclusive<u8> = 32..=126;

/// Pack bits into bytes, most significant bit first. A tail shorter than
/// 8 bits is dropped.
pub fn pack_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect()
}

/// Verify the XOR checksum of a 40-bit payload against an 8-bit checksum.
///
/// Any other input lengths are malformed and verify as `false`; this never
/// fails loudly.
pub fn verify_checksum(data_bits: &[bool], checksum_bits: &[bool]) -> bool {
    if data_bits.len() != PAYLOAD_BYTES * 8 || checksum_bits.len() != 8 {
        return false;
    }
    let computed = pack_bytes(data_bits).iter().fold(0u8, |acc, &b| acc ^ b);
    let declared = pack_bytes(checksum_bits)[0];
    computed == declared
}

/// Reconstruct the payload text from the 40 payload bits.
///
/// Bytes outside printable ASCII are dropped silently and the result is
/// trimmed of leading and trailing whitespace. Never fails — a fully
/// non-printable payload decodes to an empty string.
pub fn decode_text(data_bits: &[bool]) -> String {
    let text: String = pack_bytes(data_bits)
        .into_iter()
        .filter(|b| PRINTABLE.contains(b))
        .map(char::from)
        .collect();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn bits_of(bytes: &[u8]) -> Vec<bool> {
        bytes
            .iter()
            .flat_map(|&b| (0..8).rev().map(move |k| (b >> k) & 1 == 1))
            .collect()
    }

    #[test]
    fn pack_bytes_is_msb_first() {
        let bits = bits_of(&[0b1010_0001, 0xFF]);
        assert_eq!(pack_bytes(&bits), vec![0b1010_0001, 0xFF]);
        // A 7-bit tail is dropped.
        assert_eq!(pack_bytes(&bits[..15]), vec![0b1010_0001]);
    }

    #[test]
    fn checksum_round_trip_and_single_bit_flips() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let payload: [u8; PAYLOAD_BYTES] = rng.gen();
            let checksum = payload.iter().fold(0u8, |acc, &b| acc ^ b);
            let data_bits = bits_of(&payload);
            let checksum_bits = bits_of(&[checksum]);

            assert!(verify_checksum(&data_bits, &checksum_bits));

            // Any single payload-bit flip must be detected.
            for i in 0..data_bits.len() {
                let mut flipped = data_bits.clone();
                flipped[i] = !flipped[i];
                assert!(
                    !verify_checksum(&flipped, &checksum_bits),
                    "flip of bit {i} went undetected"
                );
            }
        }
    }

    #[test]
    fn checksum_rejects_wrong_lengths() {
        let data = vec![false; 40];
        let checksum = vec![false; 8];
        assert!(verify_checksum(&data, &checksum));
        assert!(!verify_checksum(&data[..39], &checksum));
        assert!(!verify_checksum(&data, &checksum[..7]));
        assert!(!verify_checksum(&[], &checksum));
        assert!(!verify_checksum(&data, &[]));
    }

    #[test]
    fn decodes_plain_ascii() {
        assert_eq!(decode_text(&bits_of(b"ABCDE")), "ABCDE");
    }

    #[test]
    fn zero_payload_decodes_empty() {
        assert_eq!(decode_text(&vec![false; 40]), "");
    }

    #[test]
    fn drops_non_printable_and_trims() {
        // 0x07 and 0xFF are dropped; the surviving trailing space is trimmed.
        assert_eq!(decode_text(&bits_of(&[0x41, 0x07, 0x42, 0xFF, 0x20])), "AB");
        assert_eq!(decode_text(&bits_of(b" AB  ")), "AB");
    }
}
