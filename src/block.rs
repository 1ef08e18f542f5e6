use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

/// Common block sizes, largest first
pub const CANDIDATE_BLOCK_SIZES: [usize; 3] = [32, 16, 8];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    BlockSize,
    Padding,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BlockSize => write!(f, "invalid block size"),
            Error::Padding => write!(f, "invalid PKCS#7 padding"),
        }
    }
}

/// First repeated block found in a ciphertext
#[derive(Clone, Debug, PartialEq)]
pub struct EcbMatch {
    pub block_size: usize,
    pub block: Vec<u8>,
}

/// Guess the block size from the ciphertext length
///
/// Returns the largest candidate size dividing the length, None for unaligned input.
/// Empty input also returns None even though zero divides evenly by every size: there
/// is no block to measure.
pub fn detect_block_size(ciphertext: &[u8]) -> Option<usize> {
    if ciphertext.is_empty() {
        return None;
    }
    CANDIDATE_BLOCK_SIZES
        .iter()
        .copied()
        .find(|size| ciphertext.len() % size == 0)
}

/// Split data into blocks of `block_size`, the last block may be short
pub fn split_into_blocks(data: &[u8], block_size: usize) -> Result<Vec<&[u8]>, Error> {
    if block_size == 0 {
        return Err(Error::BlockSize);
    }
    Ok(data.chunks(block_size).collect())
}

/// Look for duplicate blocks, the signature of ECB mode
///
/// Every candidate size dividing the length is tried, largest first.
/// Returns the first repeated block scanning left to right.
pub fn detect_ecb(ciphertext: &[u8]) -> Option<EcbMatch> {
    let ciphertext_len = ciphertext.len();

    for &block_size in CANDIDATE_BLOCK_SIZES.iter() {
        if ciphertext_len == 0 || ciphertext_len % block_size != 0 {
            continue;
        }

        let mut seen: HashSet<&[u8]> = HashSet::with_capacity(ciphertext_len / block_size);
        for block in ciphertext.chunks_exact(block_size) {
            if !seen.insert(block) {
                log::debug!("found repeated {}-byte block", block_size);
                return Some(EcbMatch {
                    block_size,
                    block: block.to_vec(),
                });
            }
        }
    }

    None
}

/// Pad data to a multiple of `block_size` with PKCS#7
///
/// Always adds padding, a full block when already aligned.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Result<Vec<u8>, Error> {
    if block_size == 0 || block_size > 255 {
        return Err(Error::BlockSize);
    }

    let pad_len = block_size - data.len() % block_size;
    let mut res = Vec::with_capacity(data.len() + pad_len);
    res.extend_from_slice(data);
    res.resize(data.len() + pad_len, pad_len as u8);
    Ok(res)
}

/// Strip PKCS#7 padding, validating every padding byte
pub fn pkcs7_unpad(data: &[u8], block_size: usize) -> Result<&[u8], Error> {
    if block_size == 0 || block_size > 255 {
        return Err(Error::BlockSize);
    }

    let pad_len = match data.last() {
        Some(&last) => last as usize,
        None => return Err(Error::Padding),
    };

    if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
        return Err(Error::Padding);
    }

    let (text, padding) = data.split_at(data.len() - pad_len);
    if padding.iter().any(|&b| b as usize != pad_len) {
        return Err(Error::Padding);
    }

    Ok(text)
}
