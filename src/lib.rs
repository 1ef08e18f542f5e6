#![no_std]

extern crate alloc;

pub mod block;
pub mod bytes;
pub mod frequency;
pub mod hamming;
pub mod language;
pub mod number_theory;
pub mod polybius;
pub mod randomness;
