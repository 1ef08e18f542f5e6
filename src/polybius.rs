use alloc::vec::Vec;
use core::fmt;

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8; 10] = b"0123456789";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// Password byte outside the square's alphabet
    Password(u8),
    /// Odd number of coordinate digits
    Length,
    /// Coordinate digit outside the square
    Coordinate(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Password(b) => write!(f, "invalid password byte: 0x{:02x}", b),
            Error::Length => write!(f, "odd number of coordinates"),
            Error::Coordinate(b) => write!(f, "invalid coordinate: 0x{:02x}", b),
        }
    }
}

/// Polybius square, rows of equal length (5x5 or 6x6)
pub type Square = Vec<Vec<u8>>;

/// Check whether a sample looks like Polybius ciphertext
///
/// Only spaces and the digits 0-7 may appear, and the digits must pair up.
pub fn detect(sample: &[u8]) -> bool {
    let charset_ok = sample.iter().all(|b| b" 01234567".contains(b));
    let digits = sample.iter().filter(|&&b| b != b' ').count();
    charset_ok && digits % 2 == 0
}

/// Build a keyed Polybius square
///
/// The 5x5 square merges 'j' into 'i'. The extended 6x6 square adds the digits.
/// Unique password bytes come first, followed by the rest of the alphabet.
pub fn square(password: &[u8], extended: bool) -> Result<Square, Error> {
    let mut alphabet: Vec<u8> = if extended {
        ALPHABET.iter().chain(DIGITS.iter()).copied().collect()
    } else {
        ALPHABET.iter().copied().filter(|&b| b != b'j').collect()
    };

    let mut keyed = Vec::with_capacity(alphabet.len());
    for &b in password.iter() {
        let b = if !extended && b == b'j' { b'i' } else { b };
        if !alphabet.contains(&b) {
            return Err(Error::Password(b));
        }
        if !keyed.contains(&b) {
            keyed.push(b);
        }
    }

    alphabet.retain(|b| !keyed.contains(b));
    keyed.extend_from_slice(&alphabet);

    let grid_size = if extended { 6 } else { 5 };
    Ok(keyed.chunks(grid_size).map(|row| row.to_vec()).collect())
}

/// Decrypt coordinate pairs (column, row), both one-based
///
/// Spaces between pairs are ignored.
pub fn decrypt(square: &[Vec<u8>], ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
    let digits: Vec<u8> = ciphertext.iter().copied().filter(|&b| b != b' ').collect();
    if digits.len() % 2 != 0 {
        return Err(Error::Length);
    }

    let coordinate = |b: u8| -> Result<usize, Error> {
        match b {
            b'1'..=b'9' => Ok((b - b'1') as usize),
            _ => Err(Error::Coordinate(b)),
        }
    };

    let mut plaintext = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let x = coordinate(pair[0])?;
        let y = coordinate(pair[1])?;
        let row = square.get(y).ok_or(Error::Coordinate(pair[1]))?;
        let b = row.get(x).ok_or(Error::Coordinate(pair[0]))?;
        plaintext.push(*b);
    }

    Ok(plaintext)
}
