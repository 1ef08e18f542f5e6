use core::fmt;

/// Mean per-byte Hamming distance expected between independent random streams
pub const INDEPENDENT_DISTANCE_LOWER: f64 = 3.25;
pub const INDEPENDENT_DISTANCE_UPPER: f64 = 4.75;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// Key reuse needs at least two samples, holds the number given
    InsufficientSamples(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientSamples(n) => {
                write!(f, "insufficient samples: need at least 2, got {}", n)
            }
        }
    }
}

/// Find the bitwise hamming distance between two byte slices
///
/// Only the overlapping prefix is compared
pub fn hamming_distance(left: &[u8], right: &[u8]) -> u64 {
    left.iter()
        .zip(right.iter())
        .map(|(l, r)| (l ^ r).count_ones() as u64)
        .sum()
}

/// Mean hamming distance per overlapping byte between the first sample and every other
///
/// Returns None when there are no overlapping bytes to compare.
pub fn mean_hamming_distance<S: AsRef<[u8]>>(samples: &[S]) -> Result<Option<f64>, Error> {
    if samples.len() < 2 {
        return Err(Error::InsufficientSamples(samples.len()));
    }

    let first = samples[0].as_ref();
    let (distance, length) = samples[1..]
        .iter()
        .map(|s| s.as_ref())
        .fold((0_u64, 0_u64), |(distance, length), sample| {
            let compare_len = core::cmp::min(first.len(), sample.len());
            (
                distance + hamming_distance(first, sample),
                length + compare_len as u64,
            )
        });

    if length == 0 {
        return Ok(None);
    }

    Ok(Some(distance as f64 / length as f64))
}

/// Check whether samples look like they were XORed with the same keystream
///
/// Independent random streams differ in about four bits per byte. A mean distance
/// outside (3.25, 4.75) suggests the samples are related.
pub fn detect_key_reuse<S: AsRef<[u8]>>(samples: &[S]) -> Result<bool, Error> {
    match mean_hamming_distance(samples)? {
        Some(mean) => {
            log::debug!("mean hamming distance between samples is {}", mean);
            Ok(mean < INDEPENDENT_DISTANCE_LOWER || mean > INDEPENDENT_DISTANCE_UPPER)
        }
        None => {
            log::warn!("no overlapping bytes between samples");
            Ok(false)
        }
    }
}
