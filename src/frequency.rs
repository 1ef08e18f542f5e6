use alloc::vec::Vec;

use hashbrown::HashMap;

/// Ordered set of symbols to count
///
/// Each symbol is one or more bytes. Single-byte symbols are normalized frequencies,
/// multi-byte symbols (digraphs, cribs) are raw occurrence counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolSet {
    symbols: Vec<Vec<u8>>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    /// Every possible byte value, in ascending order
    pub fn all_bytes() -> Self {
        (0x00..=0xff_u8).map(|b| [b]).collect()
    }

    /// Add a symbol, ignoring empty and duplicate symbols
    pub fn insert(&mut self, symbol: &[u8]) {
        if !symbol.is_empty() && !self.symbols.iter().any(|s| s[..] == symbol[..]) {
            self.symbols.push(symbol.to_vec());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.symbols.iter().map(|s| s.as_slice())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: AsRef<[u8]>> core::iter::FromIterator<S> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for symbol in iter {
            set.insert(symbol.as_ref());
        }
        set
    }
}

/// Mapping from symbol to observed frequency (or count, for multi-byte symbols)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable {
    table: HashMap<Vec<u8>, f64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn insert(&mut self, symbol: &[u8], frequency: f64) {
        self.table.insert(symbol.to_vec(), frequency);
    }

    /// Frequency of the symbol, zero for unknown symbols
    pub fn get(&self, symbol: &[u8]) -> f64 {
        self.table.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, symbol: &[u8]) -> bool {
        self.table.contains_key(symbol)
    }

    pub fn symbols(&self) -> SymbolSet {
        self.table.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], f64)> {
        self.table.iter().map(|(k, &v)| (k.as_slice(), v))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Largest and smallest value in the table, None for an empty table
    pub fn spread(&self) -> Option<f64> {
        let mut values = self.table.values();
        let first = *values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), &v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        });
        Some(max - min)
    }
}

impl<'a> core::iter::FromIterator<(&'a [u8], f64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (&'a [u8], f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, frequency) in iter {
            table.insert(symbol, frequency);
        }
        table
    }
}

/// Count non-overlapping occurrences of `needle` in `haystack`
///
/// An empty needle never matches.
pub fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    let needle_len = needle.len();
    if needle_len == 0 || needle_len > haystack.len() {
        return 0;
    }

    let mut count = 0;
    let mut i = 0;
    while i + needle_len <= haystack.len() {
        if haystack[i..i + needle_len] == needle[..] {
            count += 1;
            i += needle_len;
        } else {
            i += 1;
        }
    }
    count
}

/// Build a frequency table of the sample over the given symbols
///
/// Single-byte symbols are normalized against the number of sample bytes that matched any
/// single-byte symbol. Multi-byte symbols hold raw non-overlapping occurrence counts.
/// An empty sample, or one with no matches, yields an all-zero table.
pub fn frequency_table(sample: &[u8], symbols: &SymbolSet) -> FrequencyTable {
    let mut singles = [0_u64; 256];
    let mut is_single = [false; 256];

    for symbol in symbols.iter() {
        if symbol.len() == 1 {
            is_single[symbol[0] as usize] = true;
        }
    }

    let mut matched = 0_u64;
    for &byte in sample.iter() {
        if is_single[byte as usize] {
            singles[byte as usize] += 1;
            matched += 1;
        }
    }

    let mut table = FrequencyTable::new();
    for symbol in symbols.iter() {
        let value = if symbol.len() == 1 {
            if matched == 0 {
                0.0
            } else {
                singles[symbol[0] as usize] as f64 / matched as f64
            }
        } else {
            count_occurrences(sample, symbol) as f64
        };
        table.insert(symbol, value);
    }

    table
}

/// All 256 byte values ordered by descending frequency in the sample
///
/// Ties keep ascending byte order.
pub fn optimized_charset(sample: &[u8]) -> [u8; 256] {
    let mut counts = [0_u64; 256];
    for &byte in sample.iter() {
        counts[byte as usize] += 1;
    }

    let mut order: Vec<u8> = (0x00..=0xff_u8).collect();
    // stable sort
    order.sort_by(|&a, &b| counts[b as usize].cmp(&counts[a as usize]));

    let mut res = [0_u8; 256];
    res.copy_from_slice(&order);
    res
}
