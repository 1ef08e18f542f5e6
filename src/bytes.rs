use alloc::vec::Vec;

use num::bigint::BigUint;

/// XOR two byte slices
///
/// Returns the bitwise XOR of the two byte slices
///
/// If lengths are unequal, XOR of the min length
pub fn xor(el: &[u8], ar: &[u8]) -> Vec<u8> {
    el.iter().zip(ar.iter()).map(|(eb, ab)| eb ^ ab).collect()
}

/// Replace every byte outside `charset` with '.'
pub fn output_mask(text: &[u8], charset: &[u8]) -> Vec<u8> {
    let mut allowed = [false; 256];
    for &b in charset.iter() {
        allowed[b as usize] = true;
    }

    text.iter()
        .map(|&b| if allowed[b as usize] { b } else { b'.' })
        .collect()
}

/// Simple substitution: every byte of `ct_charset` in `text` becomes the byte at the same
/// position in `pt_charset`
///
/// Bytes outside `ct_charset` pass through. Extra bytes in the longer charset are ignored.
pub fn substitute(text: &[u8], pt_charset: &[u8], ct_charset: &[u8]) -> Vec<u8> {
    let mut table = [0_u8; 256];
    for (i, t) in table.iter_mut().enumerate() {
        *t = i as u8;
    }
    for (&ct, &pt) in ct_charset.iter().zip(pt_charset.iter()) {
        table[ct as usize] = pt;
    }

    text.iter().map(|&b| table[b as usize]).collect()
}

/// Interpret big-endian bytes as an unsigned integer
pub fn to_integer(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Big-endian bytes of an integer, without leading zeros
///
/// Zero encodes as a single zero byte.
pub fn from_integer(int: &BigUint) -> Vec<u8> {
    int.to_bytes_be()
}
