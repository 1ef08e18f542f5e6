use core::fmt;

use libm::fabs;
use log::{debug, info, warn};

use crate::frequency::{frequency_table, SymbolSet};

/// Mean byte value at or below which a sample is considered non-random
pub const MEAN_LOWER_BOUND: f64 = 110.0;
/// Mean byte value at or above which a sample is considered non-random
pub const MEAN_UPPER_BOUND: f64 = 145.0;
/// Maximum distance between the most and least frequent byte
pub const MAX_BYTE_SPREAD: f64 = 0.4;
/// Same-bit run length at which a sample is considered non-random
pub const LONGEST_RUN_THRESHOLD: usize = 20;
/// Maximum deviation of the Monte Carlo estimate from pi
pub const MAX_PI_DEVIATION: f64 = 0.4;
/// Samples below this length give unreliable results
pub const SMALL_SAMPLE_LEN: usize = 100;

const APPROXIMATE_PI: f64 = 3.141592654;
const MONTE_CARLO_GROUP_LEN: usize = 4;
const MONTE_CARLO_CENTER: f64 = 32512.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// Sample too short for the test to be defined
    InvalidInput { len: usize, required: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput { len, required } => write!(
                f,
                "invalid input: sample of {} bytes, need at least {}",
                len, required
            ),
        }
    }
}

/// Reliability caveat attached to a report
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advisory {
    /// Nothing to measure, every test is reported failed
    EmptySample,
    /// Fewer than [SMALL_SAMPLE_LEN] bytes
    SmallSample(usize),
}

/// Per-test outcome, `true` meaning the test failed
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RandomnessVerdict {
    pub mean_failed: bool,
    pub byte_spread_failed: bool,
    pub bit_run_failed: bool,
    pub monte_carlo_failed: bool,
}

impl RandomnessVerdict {
    /// Every test failed
    pub fn all_failed() -> Self {
        Self {
            mean_failed: true,
            byte_spread_failed: true,
            bit_run_failed: true,
            monte_carlo_failed: true,
        }
    }

    /// True if no test failed
    pub fn is_random(&self) -> bool {
        self.failures() == 0
    }

    pub fn failures(&self) -> usize {
        [
            self.mean_failed,
            self.byte_spread_failed,
            self.bit_run_failed,
            self.monte_carlo_failed,
        ]
        .iter()
        .filter(|&&f| f)
        .count()
    }

    /// Only the Monte Carlo test failed, typical of compressed rather than encrypted data
    pub fn likely_compressed(&self) -> bool {
        self.monte_carlo_failed && self.failures() == 1
    }

    /// Only the bit-run test failed, parts of the data are likely not encrypted
    pub fn likely_partially_encrypted(&self) -> bool {
        self.bit_run_failed && self.failures() == 1
    }
}

/// Detailed result of the randomness ensemble
#[derive(Clone, Debug, PartialEq)]
pub struct RandomnessReport {
    pub verdict: RandomnessVerdict,
    pub mean: f64,
    pub byte_spread: f64,
    pub longest_run: usize,
    /// None when the sample is shorter than four bytes
    pub pi_estimate: Option<f64>,
    pub advisory: Option<Advisory>,
}

/// Arithmetic mean of the byte values, None for an empty sample
pub fn mean(sample: &[u8]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    let sum: u64 = sample.iter().map(|&b| b as u64).sum();
    Some(sum as f64 / sample.len() as f64)
}

/// Distance between the most and least frequent byte value
pub fn byte_spread(sample: &[u8]) -> f64 {
    frequency_table(sample, &SymbolSet::all_bytes())
        .spread()
        .unwrap_or(0.0)
}

/// Longest run of identical bits, most-significant bit first in each byte
pub fn longest_bit_run(sample: &[u8]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut prev_bit = None;

    for &byte in sample.iter() {
        for shift in (0..8).rev() {
            let bit = (byte >> shift) & 1;
            if prev_bit == Some(bit) {
                current += 1;
            } else {
                current = 1;
            }
            if current > longest {
                longest = current;
            }
            prev_bit = Some(bit);
        }
    }

    longest
}

/// Estimate pi by mapping four-byte groups onto points in [-1, 1] x [-1, 1]
///
/// Trailing bytes beyond a multiple of four are ignored.
pub fn monte_carlo_pi(sample: &[u8]) -> Result<f64, Error> {
    if sample.len() < MONTE_CARLO_GROUP_LEN {
        return Err(Error::InvalidInput {
            len: sample.len(),
            required: MONTE_CARLO_GROUP_LEN,
        });
    }

    let coord = |hi: u8, lo: u8| ((hi as f64 * 255.0 + lo as f64) - MONTE_CARLO_CENTER) / MONTE_CARLO_CENTER;

    let mut groups = 0_u64;
    let mut hits = 0_u64;
    for group in sample.chunks_exact(MONTE_CARLO_GROUP_LEN) {
        let x = coord(group[0], group[1]);
        let y = coord(group[2], group[3]);
        if x * x + y * y <= 1.0 {
            hits += 1;
        }
        groups += 1;
    }

    Ok(4.0 * hits as f64 / groups as f64)
}

/// Run the full randomness ensemble and report every measurement
pub fn diagnose(sample: &[u8]) -> RandomnessReport {
    let sample_len = sample.len();
    let mean = match mean(sample) {
        Some(m) => m,
        None => {
            warn!("empty sample, nothing to test for randomness");
            return RandomnessReport {
                verdict: RandomnessVerdict::all_failed(),
                mean: 0.0,
                byte_spread: 0.0,
                longest_run: 0,
                pi_estimate: None,
                advisory: Some(Advisory::EmptySample),
            };
        }
    };

    let advisory = if sample_len < SMALL_SAMPLE_LEN {
        warn!("small sample size ({} bytes), results may be unreliable", sample_len);
        Some(Advisory::SmallSample(sample_len))
    } else {
        None
    };

    let mut verdict = RandomnessVerdict::default();

    debug!("arithmetic mean of sample is {} (127.5 = random)", mean);
    verdict.mean_failed = mean <= MEAN_LOWER_BOUND || mean >= MEAN_UPPER_BOUND;
    if verdict.mean_failed {
        info!("arithmetic mean of sample suggests non-random data");
    }

    let byte_spread = byte_spread(sample);
    debug!("distance between lowest and highest byte frequencies is {}", byte_spread);
    verdict.byte_spread_failed = byte_spread > MAX_BYTE_SPREAD;
    if verdict.byte_spread_failed {
        info!("distance between byte frequencies suggests non-random data");
    }

    let longest_run = longest_bit_run(sample);
    debug!("longest same-bit run in sample is {}", longest_run);
    verdict.bit_run_failed = longest_run >= LONGEST_RUN_THRESHOLD;
    if verdict.bit_run_failed {
        info!("long same-bit run suggests non-random data");
    }

    let pi_estimate = monte_carlo_pi(sample).ok();
    verdict.monte_carlo_failed = match pi_estimate {
        Some(pi) => {
            let deviation = fabs(APPROXIMATE_PI - pi);
            debug!("monte carlo pi estimate deviates by {}", deviation);
            deviation > MAX_PI_DEVIATION
        }
        None => true,
    };
    if verdict.monte_carlo_failed {
        info!("monte carlo pi estimate suggests non-random data");
    }

    if verdict.likely_compressed() {
        info!("only the monte carlo test failed, data may be compressed rather than encrypted");
    } else if verdict.likely_partially_encrypted() {
        info!("only the bit-run test failed, portions of the data may not be encrypted");
    }

    RandomnessReport {
        verdict,
        mean,
        byte_spread,
        longest_run,
        pi_estimate,
        advisory,
    }
}

/// True if the sample passes every randomness test
///
/// An empty sample is never random.
pub fn classify(sample: &[u8]) -> bool {
    diagnose(sample).verdict.is_random()
}
