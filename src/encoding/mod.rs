//! Encoding Module
//!
//! A base32-like text encoding over a 32-symbol alphabet of `A`-`Z`
//! followed by `a`-`f`. The input's UTF-8 bytes are treated as a single
//! MSB-first bitstream and consumed in 5-bit groups; each group indexes
//! the alphabet. A final group shorter than 5 bits is left-shifted to a
//! full group with zero bits on the right and followed by exactly one
//! `=`, no matter how many bits were short. This padding rule differs
//! from RFC 4648 base32 and is load-bearing for existing consumers.


// == Public Constants ==
/// The 32-symbol alphabet; a 5-bit value is the index of its symbol.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdef";

/// Padding character appended after a short final group.
pub const PADDING: char = '=';

// == Encode ==
/// Encodes a string into the 32-symbol alphabet.
///
/// Empty input yields empty output with no padding, since there are no
/// bits to flush. Output length is `ceil(bits / 5)` symbols, plus one
/// `=` iff the bit count is not a multiple of 5.
pub fn encode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(bytes.len() * 8 / 5 + 2);

    // Accumulator holds at most 12 bits: up to 4 leftover plus one byte.
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(symbol(((acc >> bits) & 0x1f) as u8));
        }
    }

    if bits > 0 {
        // Short final group: zero-fill on the right, then one '='.
        out.push(symbol(((acc << (5 - bits)) & 0x1f) as u8));
        out.push(PADDING);
    }

    out
}

/// Maps a 5-bit value to its alphabet symbol.
fn symbol(index: u8) -> char {
    ALPHABET[index as usize] as char
}
