use alloc::vec::Vec;

use libm::fabs;

use crate::frequency::{count_occurrences, frequency_table, FrequencyTable};

/// Lowercase English letters, in alphabetical order
const ENGLISH_LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Frequent English words, most common first
const ENGLISH_COMMON_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "in", "that", "have", "it", "for", "not", "on", "with",
    "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say",
    "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their", "what",
    "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make",
    "can", "like", "time", "no", "just", "him", "know", "take", "people", "into", "year",
    "your", "good", "some", "could", "them", "see", "other", "than", "then", "now", "look",
    "only", "come", "its", "over", "think", "also", "back", "after", "use", "two", "how",
    "our", "work", "first", "well", "way", "even", "new", "want", "because", "any", "these",
    "give", "day", "most", "us",
];

/// Unigram frequencies of English characters (case-insensitive)
///
/// Frequencies from: https://en.wikipedia.org/wiki/Letter_frequency
pub fn english_frequency(byte: u8) -> f64 {
    match byte {
        0x41 | 0x61 /* A | a */ => 0.08167,
        0x42 | 0x62 /* B | b */ => 0.01492,
        0x43 | 0x63 /* C | c */ => 0.02782,
        0x44 | 0x64 /* D | d */ => 0.04253,
        0x45 | 0x65 /* E | e */ => 0.12702,
        0x46 | 0x66 /* F | f */ => 0.02228,
        0x47 | 0x67 /* G | g */ => 0.02015,
        0x48 | 0x68 /* H | h */ => 0.06094,
        0x49 | 0x69 /* I | i */ => 0.06966,
        0x4a | 0x6a /* J | j */ => 0.00153,
        0x4b | 0x6b /* K | k */ => 0.00772,
        0x4c | 0x6c /* L | l */ => 0.04025,
        0x4d | 0x6d /* M | m */ => 0.02406,
        0x4e | 0x6e /* N | n */ => 0.06749,
        0x4f | 0x6f /* O | o */ => 0.07507,
        0x50 | 0x70 /* P | p */ => 0.01929,
        0x51 | 0x71 /* Q | q */ => 0.00095,
        0x52 | 0x72 /* R | r */ => 0.05987,
        0x53 | 0x73 /* S | s */ => 0.06327,
        0x54 | 0x74 /* T | t */ => 0.09056,
        0x55 | 0x75 /* U | u */ => 0.02758,
        0x56 | 0x76 /* V | v */ => 0.00978,
        0x57 | 0x77 /* W | w */ => 0.02360,
        0x58 | 0x78 /* X | x */ => 0.00150,
        0x59 | 0x79 /* Y | y */ => 0.01974,
        0x5a | 0x7a /* Z | z */ => 0.00074,
        _ => 0.0,  // characters never in english text
    }
}

/// Reference table of lowercase English letter frequencies
pub fn english_letters() -> FrequencyTable {
    ENGLISH_LETTERS
        .iter()
        .map(|b| (core::slice::from_ref(b), english_frequency(*b)))
        .collect()
}

/// Common English words, usable as cribs
pub fn english_common_words() -> Vec<Vec<u8>> {
    ENGLISH_COMMON_WORDS
        .iter()
        .map(|w| w.as_bytes().to_vec())
        .collect()
}

/// Reference data for one plaintext language
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageProfile {
    pub frequencies: FrequencyTable,
    pub common_words: Vec<Vec<u8>>,
}

impl LanguageProfile {
    pub fn new(frequencies: FrequencyTable, common_words: Vec<Vec<u8>>) -> Self {
        Self {
            frequencies,
            common_words,
        }
    }

    /// English letter frequencies and common words
    pub fn english() -> Self {
        Self::new(english_letters(), english_common_words())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreOptions {
    /// Count crib words in the candidate
    pub detect_words: bool,
    /// Match crib words case-sensitively
    pub case_sensitive: bool,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            detect_words: true,
            case_sensitive: true,
        }
    }
}

/// Individual plaintext-likeness scores
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaintextScore {
    /// Sum of absolute deviations from the reference frequencies (lower is better)
    pub char_deviation: f64,
    /// Total length of crib words found (higher is better)
    pub word_score: usize,
}

impl PlaintextScore {
    /// Combined score, lower is more plaintext-like
    pub fn composite(&self) -> f64 {
        let word = if self.word_score == 0 {
            1.0
        } else {
            1.0 / self.word_score as f64
        };
        word + self.char_deviation
    }
}

/// Total number of bytes matched by non-overlapping occurrences of each word
///
/// Case-insensitive matching lowercases both the candidate and the words (ASCII only).
pub fn count_words<W: AsRef<[u8]>>(candidate: &[u8], words: &[W], case_sensitive: bool) -> usize {
    let lowered;
    let haystack = if case_sensitive {
        candidate
    } else {
        lowered = candidate.to_ascii_lowercase();
        lowered.as_slice()
    };

    words
        .iter()
        .map(|w| {
            let word = w.as_ref();
            let count = if case_sensitive {
                count_occurrences(haystack, word)
            } else {
                count_occurrences(haystack, &word.to_ascii_lowercase())
            };
            count * word.len()
        })
        .sum()
}

/// Character deviation and crib word score of a candidate plaintext
pub fn score_components(candidate: &[u8], profile: &LanguageProfile, options: &ScoreOptions) -> PlaintextScore {
    let reference = &profile.frequencies;
    let observed = frequency_table(candidate, &reference.symbols());

    let char_deviation: f64 = reference
        .iter()
        .map(|(symbol, expected)| fabs(observed.get(symbol) - expected))
        .sum();

    let word_score = if options.detect_words {
        count_words(candidate, profile.common_words.as_slice(), options.case_sensitive)
    } else {
        0
    };

    log::trace!("char deviation: {}, word score: {}", char_deviation, word_score);

    PlaintextScore {
        char_deviation,
        word_score,
    }
}

/// Composite plaintext-likeness score of a candidate, lower is better
pub fn score(candidate: &[u8], profile: &LanguageProfile, options: &ScoreOptions) -> f64 {
    score_components(candidate, profile, options).composite()
}
