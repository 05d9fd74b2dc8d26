#![allow(dead_code)]

use simplect::Word;

/// All-zero, all-one, both alternating patterns and a counting key.
pub fn boundary_keys<W: Word>() -> Vec<W::Bytes> {
    let mut keys = Vec::new();
    for fill in [0x00u8, 0xFF, 0xAA, 0x55] {
        let mut key = W::zero_bytes();
        key.as_mut().fill(fill);
        keys.push(key);
    }
    keys.push(counting::<W>(1));
    keys
}

/// Bytes `start, start + 1, ...` (wrapping).
pub fn counting<W: Word>(start: u8) -> W::Bytes {
    let mut bytes = W::zero_bytes();
    for (i, byte) in bytes.as_mut().iter_mut().enumerate() {
        *byte = start.wrapping_add(i as u8);
    }
    bytes
}

/// Buffer filled with `value`.
pub fn filled<W: Word>(value: u8) -> W::Bytes {
    let mut bytes = W::zero_bytes();
    bytes.as_mut().fill(value);
    bytes
}

/// Decode a hex literal used in known-answer tests.
pub fn unhex(digits: &str) -> Vec<u8> {
    hex::decode(digits).expect("test vector is valid hex")
}
