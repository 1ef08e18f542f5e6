use num::bigint::{BigInt, BigUint};
use num::{One, Zero};

use cryptanalysis::{
    bytes::{from_integer, to_integer},
    number_theory::{
        derive_private_exponent, extended_gcd, gcd, mod_inverse, solve_crt, Bezout, Congruence,
        Error,
    },
};

fn big(n: i64) -> BigInt {
    BigInt::from(n)
}

fn unsigned(n: &BigInt) -> BigUint {
    n.to_biguint().unwrap()
}

#[test]
fn bezout_identity() {
    for a in -40_i64..40 {
        for b in -40_i64..40 {
            let Bezout { x, y, g } = extended_gcd(&a, &b);
            assert_eq!(a * x + b * y, g, "a: {}, b: {}", a, b);
            assert_eq!(gcd(&a, &b), g);
        }
    }

    let a = big(0x1234_5678_9abc);
    let b = big(0xfedc_ba98);
    let Bezout { x, y, g } = extended_gcd(&a, &b);
    assert_eq!(&a * &x + &b * &y, g);
}

#[test]
fn crt_small_system() {
    let system = [
        Congruence::new(big(2), big(3)),
        Congruence::new(big(3), big(5)),
        Congruence::new(big(2), big(7)),
    ];

    let res = solve_crt(&system).unwrap();

    assert_eq!(res.solution, big(23));
    assert_eq!(res.modulus, big(105));
    assert_eq!(&res.solution % big(3), big(2));
    assert_eq!(&res.solution % big(5), big(3));
    assert_eq!(&res.solution % big(7), big(2));
}

#[test]
fn crt_non_coprime_moduli() {
    let system = [Congruence::new(big(1), big(4)), Congruence::new(big(1), big(6))];

    match solve_crt(&system) {
        Err(Error::NonCoprimeModuli { left, right }) => {
            assert_eq!(left, big(4));
            assert_eq!(right, big(6));
        }
        res => panic!("unexpected result: {:?}", res),
    }
}

#[test]
fn rsa_private_exponent() {
    let (p, q, e) = (big(61), big(53), big(17));
    let n = &p * &q;

    let d = derive_private_exponent(&p, &q, &e).unwrap();
    assert_eq!(d, big(2753));

    let (n, e, d) = (unsigned(&n), unsigned(&e), unsigned(&d));
    for &m in [0_u32, 1, 65, 1234, 3232].iter() {
        let m = BigUint::from(m);
        let c = m.modpow(&e, &n);
        assert_eq!(c.modpow(&d, &n), m);
    }

    // e shares a factor with (p-1)(q-1) = 3120
    assert_eq!(
        derive_private_exponent(&p, &q, &big(15)),
        Err(Error::NotInvertible {
            value: big(15),
            modulus: big(3120)
        })
    );
}

#[test]
fn mod_inverse_range() {
    let m = big(7919);
    for e in 1_i64..200 {
        let d = mod_inverse(&big(e), &m).unwrap();
        assert!(d >= BigInt::zero() && d < m);
        assert!(((big(e) * &d) % &m).is_one());
    }
}

#[test]
fn rsa_broadcast() {
    // same message encrypted under three public keys with e = 3
    let moduli = [big(61 * 53), big(67 * 71), big(73 * 79)];
    let msg = to_integer(b"*");
    let e = BigUint::from(3_u32);

    let system: Vec<Congruence<BigInt>> = moduli
        .iter()
        .map(|n| {
            let c = msg.modpow(&e, &unsigned(n));
            Congruence::new(BigInt::from(c), n.clone())
        })
        .collect();

    // m^3 is smaller than the product of the moduli, so CRT recovers it exactly
    let res = solve_crt(&system).unwrap();
    let cubed = unsigned(&res.solution);
    assert_eq!(cubed, &msg * &msg * &msg);

    let root = (0_u32..256)
        .map(BigUint::from)
        .find(|m| m * m * m == cubed)
        .unwrap();
    assert_eq!(from_integer(&root), b"*".to_vec());
}
