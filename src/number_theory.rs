use alloc::vec::Vec;
use core::fmt;

use num::Integer;

#[derive(Clone, Debug, PartialEq)]
pub enum Error<T> {
    /// No inverse exists, gcd(value, modulus) != 1
    NotInvertible { value: T, modulus: T },
    /// Two CRT moduli share a common factor
    NonCoprimeModuli { left: T, right: T },
    /// Moduli must be strictly positive
    InvalidModulus(T),
}

impl<T: fmt::Display> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInvertible { value, modulus } => {
                write!(f, "{} is not invertible modulo {}", value, modulus)
            }
            Error::NonCoprimeModuli { left, right } => {
                write!(f, "moduli {} and {} are not coprime", left, right)
            }
            Error::InvalidModulus(m) => write!(f, "invalid modulus: {}", m),
        }
    }
}

/// Bezout coefficients and GCD: a*x + b*y = g
#[derive(Clone, Debug, PartialEq)]
pub struct Bezout<T> {
    pub x: T,
    pub y: T,
    pub g: T,
}

/// A congruence: x = residue (mod modulus)
#[derive(Clone, Debug, PartialEq)]
pub struct Congruence<T> {
    pub residue: T,
    pub modulus: T,
}

impl<T> Congruence<T> {
    pub fn new(residue: T, modulus: T) -> Self {
        Self { residue, modulus }
    }
}

/// Unique solution of a CRT system, modulo the product of all moduli
#[derive(Clone, Debug, PartialEq)]
pub struct CrtSolution<T> {
    pub solution: T,
    pub modulus: T,
}

/// Iterative extended Euclidean algorithm
///
/// Intermediate quotients use floor division, so remainders take the sign of the divisor.
/// With a positive `b` the returned `g` is non-negative.
pub fn extended_gcd<T: Integer + Clone>(a: &T, b: &T) -> Bezout<T> {
    let mut a = a.clone();
    let mut b = b.clone();

    let (mut x, mut last_x) = (T::zero(), T::one());
    let (mut y, mut last_y) = (T::one(), T::zero());

    while !b.is_zero() {
        let (q, r) = a.div_mod_floor(&b);
        a = core::mem::replace(&mut b, r);

        let next_x = last_x - q.clone() * x.clone();
        last_x = core::mem::replace(&mut x, next_x);

        let next_y = last_y - q * y.clone();
        last_y = core::mem::replace(&mut y, next_y);
    }

    Bezout {
        x: last_x,
        y: last_y,
        g: a,
    }
}

/// Greatest common divisor, the `g` component of [extended_gcd]
pub fn gcd<T: Integer + Clone>(a: &T, b: &T) -> T {
    extended_gcd(a, b).g
}

/// Find d such that e*d = 1 (mod m), reduced into [0, m)
pub fn mod_inverse<T: Integer + Clone>(e: &T, m: &T) -> Result<T, Error<T>> {
    if *m <= T::zero() {
        return Err(Error::InvalidModulus(m.clone()));
    }

    let bezout = extended_gcd(e, m);
    if !bezout.g.is_one() {
        return Err(Error::NotInvertible {
            value: e.clone(),
            modulus: m.clone(),
        });
    }

    Ok(bezout.x.mod_floor(m))
}

/// Derive the RSA private exponent from the factors of the modulus
///
/// d = e^-1 mod (p-1)(q-1)
///
/// Factors that leave (p-1)(q-1) non-positive have no inverse and yield `NotInvertible`.
pub fn derive_private_exponent<T: Integer + Clone>(p: &T, q: &T, e: &T) -> Result<T, Error<T>> {
    let phi = (p.clone() - T::one()) * (q.clone() - T::one());
    if phi <= T::zero() {
        return Err(Error::NotInvertible {
            value: e.clone(),
            modulus: phi,
        });
    }
    mod_inverse(e, &phi)
}

/// Solve a system of congruences with the Chinese Remainder Theorem
///
/// Moduli must be positive and pairwise coprime. An empty system has the trivial solution 0 (mod 1).
pub fn solve_crt<T: Integer + Clone>(congruences: &[Congruence<T>]) -> Result<CrtSolution<T>, Error<T>> {
    let moduli: Vec<&T> = congruences.iter().map(|c| &c.modulus).collect();

    for (i, &left) in moduli.iter().enumerate() {
        if *left <= T::zero() {
            return Err(Error::InvalidModulus(left.clone()));
        }
        for &right in moduli[i + 1..].iter() {
            if !gcd(left, right).is_one() {
                return Err(Error::NonCoprimeModuli {
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        }
    }

    let n = moduli
        .iter()
        .fold(T::one(), |acc, &m| acc * m.clone());

    // every term stays below n, the running sum below 2n
    let mut sum = T::zero();
    for c in congruences.iter() {
        let m = n.clone() / c.modulus.clone();
        let s = mod_inverse(&m, &c.modulus)?;
        let r = c.residue.mod_floor(&c.modulus);
        let term = (r * s).mod_floor(&c.modulus) * m;
        sum = (sum + term).mod_floor(&n);
    }

    log::debug!("solved CRT system of {} congruences", congruences.len());

    Ok(CrtSolution {
        solution: sum,
        modulus: n,
    })
}
