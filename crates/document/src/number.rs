//! Exact numeric values.
//!
//! Integers are kept as integers so values like `9007199254740993` survive
//! a decode/encode cycle unchanged. Only values that arrived as floats are
//! stored as `f64`.

use core::fmt;

/// A document number.
#[derive(Clone, Copy, Debug)]
pub struct Number {
    pub(crate) n: N,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum N {
    /// Always non-negative.
    PosInt(u64),
    /// Always negative.
    NegInt(i64),
    Float(f64),
}

// 2^63 and 2^64 as f64; both are exact.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

impl Number {
    /// Creates a number from a float.
    pub fn from_f64(f: f64) -> Self {
        Self { n: N::Float(f) }
    }

    /// Returns true if the value is an integer that fits in `i64`.
    pub fn is_i64(&self) -> bool {
        self.as_i64().is_some()
    }

    /// Returns true if the value is an integer that fits in `u64`.
    pub fn is_u64(&self) -> bool {
        self.as_u64().is_some()
    }

    /// Returns true if the value was stored as a float.
    pub fn is_f64(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    /// Returns the value as `i64` if it is integral and in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::PosInt(u) => i64::try_from(u).ok(),
            N::NegInt(i) => Some(i),
            N::Float(f) => float_to_i64(f),
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer in range.
    pub fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::PosInt(u) => Some(u),
            N::NegInt(_) => None,
            N::Float(f) => float_to_u64(f),
        }
    }

    /// Returns the value as `f64`. Large integers may lose precision.
    pub fn as_f64(&self) -> f64 {
        match self.n {
            N::PosInt(u) => u as f64,
            N::NegInt(i) => i as f64,
            N::Float(f) => f,
        }
    }
}

fn float_to_i64(f: f64) -> Option<i64> {
    if f >= -I64_BOUND && f < I64_BOUND {
        let i = f as i64;
        if i as f64 == f {
            return Some(i);
        }
    }
    None
}

fn float_to_u64(f: f64) -> Option<u64> {
    if f >= 0.0 && f < U64_BOUND {
        let u = f as u64;
        if u as f64 == f {
            return Some(u);
        }
    }
    None
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.n, other.n) {
            (N::PosInt(a), N::PosInt(b)) => a == b,
            (N::NegInt(a), N::NegInt(b)) => a == b,
            (N::PosInt(_), N::NegInt(_)) | (N::NegInt(_), N::PosInt(_)) => false,
            (N::Float(a), N::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (N::PosInt(u), N::Float(f)) | (N::Float(f), N::PosInt(u)) => float_to_u64(f) == Some(u),
            (N::NegInt(i), N::Float(f)) | (N::Float(f), N::NegInt(i)) => float_to_i64(f) == Some(i),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::PosInt(u) => write!(f, "{}", u),
            N::NegInt(i) => write!(f, "{}", i),
            N::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<u64> for Number {
    fn from(u: u64) -> Self {
        Self { n: N::PosInt(u) }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        let n = if i < 0 { N::NegInt(i) } else { N::PosInt(i as u64) };
        Self { n }
    }
}

impl From<u32> for Number {
    fn from(u: u32) -> Self {
        Number::from(u as u64)
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Number::from(i as i64)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::from_f64(f)
    }
}
