//! Additive obfuscation for index records and payload bytes.
//!
//! Record layout: [ offset (4 B) | tag + 24-bit size (4 B) | stem (8 B) ]
//! Each field group gets its own adder; every payload byte gets a fourth.
//! All arithmetic is wrapping modulo-256 — this is a light veil against
//! casual inspection, not a cipher.
//!
//! `unmask_*` is the exact inverse of `mask_*` for every byte value.

use crate::index::RECORD_LEN;

/// Adder for record bytes 0–3 (big-endian payload offset).
pub const MASK_OFFSET: u8 = 97;
/// Adder for record bytes 4–7 (type tag + big-endian 24-bit size).
pub const MASK_TYPE_SIZE: u8 = 11;
/// Adder for record bytes 8–15 (zero-padded filename stem).
pub const MASK_STEM: u8 = 53;
/// Adder for every payload byte.
pub const MASK_PAYLOAD: u8 = 37;

/// Obfuscate a clear 16-byte index record in place.
pub fn mask_record(record: &mut [u8; RECORD_LEN]) {
    for b in &mut record[0..4] {
        *b = b.wrapping_add(MASK_OFFSET);
    }
    for b in &mut record[4..8] {
        *b = b.wrapping_add(MASK_TYPE_SIZE);
    }
    for b in &mut record[8..16] {
        *b = b.wrapping_add(MASK_STEM);
    }
}

/// De-obfuscate a 16-byte index record in place.
pub fn unmask_record(record: &mut [u8; RECORD_LEN]) {
    for b in &mut record[0..4] {
        *b = b.wrapping_sub(MASK_OFFSET);
    }
    for b in &mut record[4..8] {
        *b = b.wrapping_sub(MASK_TYPE_SIZE);
    }
    for b in &mut record[8..16] {
        *b = b.wrapping_sub(MASK_STEM);
    }
}

/// Obfuscate payload bytes in place.
pub fn mask_payload(data: &mut [u8]) {
    for b in data {
        *b = b.wrapping_add(MASK_PAYLOAD);
    }
}

/// De-obfuscate payload bytes in place.
pub fn unmask_payload(data: &mut [u8]) {
    for b in data {
        *b = b.wrapping_sub(MASK_PAYLOAD);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn record_mask_is_invertible_for_every_byte_value() {
        for v in 0u8..=255 {
            let mut rec = [v; RECORD_LEN];
            mask_record(&mut rec);
            unmask_record(&mut rec);
            assert_eq!(rec, [v; RECORD_LEN]);
        }
    }

    #[test]
    fn masked_record_differs_per_field_group() {
        let mut rec = [0u8; RECORD_LEN];
        mask_record(&mut rec);
        assert_eq!(&rec[0..4], &[MASK_OFFSET; 4]);
        assert_eq!(&rec[4..8], &[MASK_TYPE_SIZE; 4]);
        assert_eq!(&rec[8..16], &[MASK_STEM; 8]);
    }

    proptest! {
        #[test]
        fn payload_mask_round_trips(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let mut buf = data.clone();
            mask_payload(&mut buf);
            unmask_payload(&mut buf);
            prop_assert_eq!(buf, data);
        }

        #[test]
        fn record_mask_round_trips(bytes in proptest::array::uniform16(any::<u8>())) {
            let mut rec = bytes;
            mask_record(&mut rec);
            unmask_record(&mut rec);
            prop_assert_eq!(rec, bytes);
        }
    }
}
