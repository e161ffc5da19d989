// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Codons as tempo changes: every note length is a multiple of the previous one.

use crate::rational::Rational;
use crate::rna::{Codon, Rna};
use crate::time::{Seconds, TimeSig};

/// Limits and grid for note lengths, all in absolute time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DurationRules {
    /// Length a note falls back to when it leaves `shortest..=longest`.
    pub reset: Seconds,
    pub shortest: Seconds,
    pub longest: Seconds,
    /// Every length is snapped to a multiple of this.
    pub grid: Seconds,
}

impl DurationRules {
    /// Quarter note resets and a sixteenth note grid at the given tempo.
    pub fn for_time_sig(sig: TimeSig) -> Self {
        DurationRules {
            reset: sig.seconds(Rational::nth(4)),
            shortest: Rational::nth(8),
            longest: Rational::int(4),
            grid: sig.seconds(Rational::nth(16)),
        }
    }

    fn step(&self, previous: Seconds, codon: Codon) -> Seconds {
        let mut length = previous * multiplier(codon);
        if length < self.shortest || length > self.longest {
            length = self.reset;
        }
        length.quantize(self.grid)
    }
}

/// Factor by which a codon stretches the running note length.
///
/// ```
/// # use viriditas::rational::Rational;
/// # use viriditas::rna::Codon;
/// # use viriditas::express::duration::multiplier;
///
/// let m = |v| multiplier(Codon::new(v).unwrap());
/// assert_eq!(m(6), Rational::int(8));
/// assert_eq!(m(4), Rational::int(4));
/// assert_eq!(m(1), Rational::new(3, 2));
/// assert_eq!(m(0), Rational::int(1));
/// assert_eq!(m(-1), Rational::new(2, 3));
/// assert_eq!(m(-4), Rational::new(1, 4));
/// assert_eq!(m(-6), Rational::new(1, 8));
/// ```
pub fn multiplier(codon: Codon) -> Rational {
    match codon.value() {
        v if v >= 6 => Rational::int(8),
        v @ 2..=5 => Rational::int(v as i64),
        1 => Rational::new(3, 2),
        0 => Rational::ONE,
        -1 => Rational::new(2, 3),
        v @ -5..=-2 => Rational::nth(-(v as i64)),
        _ => Rational::nth(8),
    }
}

/// Chain the codons into note lengths starting from `reference`.
pub fn to_duration(rna: &Rna, reference: Seconds, rules: &DurationRules) -> Vec<Seconds> {
    let mut previous = reference;
    rna.codons()
        .iter()
        .map(|&codon| {
            previous = rules.step(previous, codon);
            previous
        })
        .collect()
}
