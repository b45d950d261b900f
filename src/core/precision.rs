//! Working-precision tags and the scalar trait the kernel is monomorphized over.
//!
//! Every arithmetic result the kernel produces is representable in the chosen
//! working precision: kernel code computes natively in `T`, so each multiply,
//! add, and divide — including every accumulation step of an inner product or
//! column sum — rounds to `T` before the next operation sees it. The runtime
//! `Precision` switch happens exactly once, at the harness boundary.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use crate::error::LabError;

/// Runtime tag for the working precision of a kernel computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// IEEE-754 binary32.
    Single,
    /// IEEE-754 binary64.
    Double,
}

impl Precision {
    /// Textual tag used in records and CSV output.
    pub fn label(self) -> &'static str {
        match self {
            Precision::Single => "f32",
            Precision::Double => "f64",
        }
    }

    /// Machine epsilon of the tagged precision, widened to f64.
    pub fn epsilon(self) -> f64 {
        match self {
            Precision::Single => f32::EPSILON as f64,
            Precision::Double => f64::EPSILON,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Precision {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f32" | "single" | "float" => Ok(Precision::Single),
            "f64" | "double" => Ok(Precision::Double),
            other => Err(LabError::InvalidConfig(format!(
                "unknown precision {other:?} (expected f32/single or f64/double)"
            ))),
        }
    }
}

/// Scalar type usable as a working precision for kernel arithmetic.
///
/// Implemented exactly twice, for `f32` and `f64`. Conversions to and from
/// `f64` are the only places a value crosses precisions; `from_f64` is the
/// rounding step that brings externally supplied reals (family parameters,
/// reference solutions) into the working precision.
pub trait WorkingScalar: Float + Copy + PartialOrd + fmt::Debug + fmt::Display + 'static {
    /// The runtime tag this instantiation corresponds to.
    const TAG: Precision;

    /// Round a double-precision value to this precision.
    fn from_f64(v: f64) -> Self;

    /// Widen to f64 without changing the value.
    fn to_f64(self) -> f64;
}

impl WorkingScalar for f32 {
    const TAG: Precision = Precision::Single;

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl WorkingScalar for f64 {
    const TAG: Precision = Precision::Double;

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }
}
