//! Common utilities and helpers

use std::ops::{Rem, Sub};

pub mod time;

/// Greatest common divisor (Euclid).
///
/// `gcd(a, 0) == a`, so a zero operand never divides.
pub fn gcd<T>(mut a: T, mut b: T) -> T
where
    T: Copy + PartialEq + Default + Rem<Output = T>,
{
    let zero = T::default();
    while b != zero {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Absolute difference for any ordered numeric type
pub fn abs_diff<T>(a: T, b: T) -> T
where
    T: PartialOrd + Sub<Output = T>,
{
    if a > b {
        a - b
    } else {
        b - a
    }
}

/// Larger of two partially ordered values, preferring `a` on ties or NaN
pub fn max<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// Smaller of two partially ordered values, preferring `a` on ties or NaN
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

/// Ceiling division for a non-negative numerator and positive divisor
pub fn ceil_div(numerator: i64, divisor: i64) -> i64 {
    numerator / divisor + i64::from(numerator % divisor != 0)
}
