// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Exact fractions for note lengths, loop points and phrase offsets.
//!
//! Duration multipliers like `3/2` and `2/3` are chained over a whole phrase,
//! so lengths are kept as fractions and only turned into floats for display.

use std::fmt;
use std::{cmp::Ordering, ops};

type Int = i64;

/// A fraction in lowest terms with a positive denominator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rational {
    num: Int,
    denom: Int,
}

impl Rational {
    pub const ZERO: Rational = Rational { num: 0, denom: 1 };
    pub const ONE: Rational = Rational { num: 1, denom: 1 };

    /// Build `num / denom` in lowest terms. A zero denominator is a bug in the caller.
    ///
    /// ```
    /// # use viriditas::rational::*;
    ///
    /// assert_eq!(Rational::new(6, 8), Rational::new(3, 4));
    /// assert_eq!(Rational::new(3, -4), Rational::new(-3, 4));
    /// assert_eq!(Rational::new(0, -7), Rational::ZERO);
    /// ```
    pub fn new(num: Int, denom: Int) -> Rational {
        assert_ne!(denom, 0, "zero denominator in {}/{}", num, denom);
        let div = gcd(num, denom) * denom.signum();
        Rational {
            num: num / div,
            denom: denom / div,
        }
    }

    pub const fn int(int: Int) -> Rational {
        Rational { num: int, denom: 1 }
    }

    /// The length of an `n`th note, e.g. `nth(4)` for a quarter.
    pub fn nth(n: Int) -> Self {
        Rational::new(1, n)
    }

    /// Closest integer, halves rounded away from zero.
    ///
    /// ```
    /// # use viriditas::rational::*;
    ///
    /// assert_eq!(Rational::new(5, 2).round(), 3);
    /// assert_eq!(Rational::new(-5, 2).round(), -3);
    /// assert_eq!(Rational::new(3, 7).round(), 0);
    /// assert_eq!(Rational::new(4, 7).round(), 1);
    /// ```
    pub fn round(self) -> Int {
        (self.num + self.num.signum() * self.denom / 2) / self.denom
    }

    /// Snap to the nearest multiple of `grid`.
    ///
    /// ```
    /// # use viriditas::rational::*;
    ///
    /// let sixteenth = Rational::new(1, 12);
    /// assert_eq!(Rational::new(2, 9).quantize(sixteenth), Rational::new(1, 4));
    /// assert_eq!(Rational::new(8, 3).quantize(sixteenth), Rational::new(8, 3));
    /// ```
    pub fn quantize(self, grid: Rational) -> Rational {
        grid * (self / grid).round()
    }

    pub const fn denominator(self) -> Int {
        self.denom
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.denom as f64
    }
}

impl Default for Rational {
    fn default() -> Self {
        Rational::ZERO
    }
}

impl ops::Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        let denom = self.denom / gcd(self.denom, rhs.denom) * rhs.denom;
        Rational::new(
            self.num * (denom / self.denom) + rhs.num * (denom / rhs.denom),
            denom,
        )
    }
}

impl ops::Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        self + -rhs
    }
}

impl ops::Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            num: -self.num,
            denom: self.denom,
        }
    }
}

impl ops::AddAssign for Rational {
    fn add_assign(&mut self, rhs: Rational) {
        *self = *self + rhs;
    }
}

impl ops::Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        Rational::new(self.num * rhs.num, self.denom * rhs.denom)
    }
}

impl ops::Div for Rational {
    type Output = Rational;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Rational) -> Rational {
        Rational::new(self.num * rhs.denom, self.denom * rhs.num)
    }
}

impl ops::Mul<Int> for Rational {
    type Output = Rational;

    fn mul(self, rhs: Int) -> Rational {
        Rational::new(self.num * rhs, self.denom)
    }
}

/// ```
/// # use viriditas::rational::*;
/// assert_eq!(Rational::new(1, 4) / 2, Rational::nth(8));
/// assert_eq!(Rational::new(3, 4) / -3, Rational::new(-1, 4));
/// ```
impl ops::Div<Int> for Rational {
    type Output = Rational;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Int) -> Rational {
        Rational::new(self.num, self.denom * rhs)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let l = self.num as i128 * other.denom as i128;
        let r = other.num as i128 * self.denom as i128;
        l.cmp(&r)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.denom)
        }
    }
}

/// Greatest common divisor, always non-negative.
///
/// ```
/// use viriditas::rational::*;
///
/// assert_eq!(gcd(12, 18), 6);
/// assert_eq!(gcd(-4, 6), 2);
/// assert_eq!(gcd(7, 0), 7);
/// ```
pub fn gcd(a: Int, b: Int) -> Int {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
