use rand::{rngs::StdRng, Rng, SeedableRng};

use cryptanalysis::{
    block::{detect_block_size, detect_ecb, EcbMatch},
    frequency::{frequency_table, optimized_charset, SymbolSet},
    hamming::detect_key_reuse,
    randomness::{classify, diagnose, monte_carlo_pi},
};

use crate::common::{random_bytes, xor_repeating};

const PI: f64 = 3.141592654;

#[test]
fn random_bytes_are_random() {
    let passed = (0..20_u64)
        .filter(|&seed| classify(&random_bytes(seed, 1000)))
        .count();

    // each test has a small false-positive rate on 1000 bytes
    assert!(passed >= 18, "only {} of 20 random buffers passed", passed);
}

#[test]
fn zero_bytes_are_not_random() {
    let zeros = vec![0_u8; 1000];
    let report = diagnose(&zeros);

    assert!(!classify(&zeros));
    assert!(report.verdict.mean_failed);
    assert!(report.verdict.byte_spread_failed);
}

#[test]
fn english_text_is_not_random() {
    let text = b"It was the best of times, it was the worst of times, it was the age of wisdom, \
it was the age of foolishness, it was the epoch of belief, it was the epoch of incredulity, \
it was the season of Light, it was the season of Darkness, it was the spring of hope.";

    let report = diagnose(&text[..]);
    assert!(!report.verdict.is_random());
    assert!(report.verdict.mean_failed);
}

#[test]
fn monte_carlo_converges() {
    let small = monte_carlo_pi(&random_bytes(7, 400)).unwrap();
    let large = monte_carlo_pi(&random_bytes(7, 400_000)).unwrap();

    assert!((large - PI).abs() < 0.4);
    assert!((large - PI).abs() < 0.1);
    assert!(small > 0.0 && small <= 4.0);
}

#[test]
fn frequency_table_sums_to_one() {
    let mut rng = StdRng::seed_from_u64(1);
    let symbols = SymbolSet::all_bytes();

    for seed in 0..50_u64 {
        let len = rng.gen_range(1, 512);
        let table = frequency_table(&random_bytes(seed, len), &symbols);
        let sum: f64 = table.iter().map(|(_, v)| v).sum();
        assert!((sum - 1.0).abs() < 1e-9, "len {} sums to {}", len, sum);
    }

    let empty = frequency_table(b"", &symbols);
    assert!(empty.iter().all(|(_, v)| v == 0.0));
}

#[test]
fn optimized_charset_orders_by_frequency() {
    let charset = optimized_charset(b"this is a sentence with plenty of spaces in it");

    assert_eq!(charset[0], b' ');
    let mut sorted = charset.to_vec();
    sorted.sort();
    assert_eq!(sorted, (0x00..=0xff_u8).collect::<Vec<u8>>());
}

#[test]
fn ecb_repeated_block() {
    let repeated = random_bytes(3, 16);
    let mut ciphertext = repeated.clone();
    ciphertext.extend_from_slice(&repeated);
    ciphertext.extend_from_slice(&random_bytes(4, 16));

    assert_eq!(detect_block_size(&ciphertext), Some(16));
    assert_eq!(
        detect_ecb(&ciphertext),
        Some(EcbMatch {
            block_size: 16,
            block: repeated,
        })
    );
}

#[test]
fn ecb_falls_through_to_smaller_block() {
    let ciphertext = b"AAAAAAAABBBBBBBBAAAAAAAACCCCCCCC";

    assert_eq!(detect_block_size(ciphertext), Some(32));
    assert_eq!(
        detect_ecb(ciphertext),
        Some(EcbMatch {
            block_size: 8,
            block: b"AAAAAAAA".to_vec(),
        })
    );
}

#[test]
fn ecb_largest_repeating_size_wins() {
    let half = random_bytes(6, 32);
    let mut ciphertext = half.clone();
    ciphertext.extend_from_slice(&half);

    // blocks repeat at 16 bytes too
    assert_eq!(
        detect_ecb(&ciphertext),
        Some(EcbMatch {
            block_size: 32,
            block: half,
        })
    );
}

#[test]
fn ecb_no_repeats() {
    // 96 bytes divides into 32, 16 and 8 byte blocks
    let ciphertext = random_bytes(5, 96);

    assert_eq!(detect_block_size(&ciphertext), Some(32));
    assert_eq!(detect_ecb(&ciphertext), None);
}

#[test]
fn key_reuse() {
    let keystream = random_bytes(11, 64);
    let first = xor_repeating(b"Attack the eastern gate at dawn, bring all of the archers along.", &keystream);
    let second = xor_repeating(b"Hold the western wall until dusk and wait for the signal fires!!", &keystream);

    assert_eq!(detect_key_reuse(&[&first, &second]), Ok(true));

    let independent = [random_bytes(12, 4096), random_bytes(13, 4096), random_bytes(14, 4096)];
    assert_eq!(detect_key_reuse(&independent), Ok(false));
}
