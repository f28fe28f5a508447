//! Generic trait for numeric vector elements.
use ndarray::{LinalgScalar, ScalarOperand};
use num::{Float, FromPrimitive, NumCast, ToPrimitive};
use std::fmt::{Debug, Display};

/// Bound satisfied by any real-valued type a corpus vector may be made of.
///
/// Lets the rest of the crate (hashers, distance functions, the trie's
/// caller-facing API) stay generic over `f32`/`f64` instead of hard-coding
/// one float width.
pub trait Numeric:
    LinalgScalar + ScalarOperand + NumCast + ToPrimitive + FromPrimitive + Float + Send + Sync + Debug + Display
{
}

impl Numeric for f32 {}
impl Numeric for f64 {}
