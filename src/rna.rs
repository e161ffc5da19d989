// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Folding a strand of DNA into codon sums.

use std::fmt;

use crate::dna::Dna;

/// The sum of three consecutive base pair magnitudes, always within [-6, 6].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Codon(i8);

impl Codon {
    pub const MIN: i32 = -6;
    pub const MAX: i32 = 6;

    /// ```
    /// # use viriditas::rna::Codon;
    ///
    /// assert_eq!(Codon::new(-6).map(Codon::value), Some(-6));
    /// assert_eq!(Codon::new(7), None);
    /// ```
    pub fn new(value: i32) -> Option<Codon> {
        if (Codon::MIN..=Codon::MAX).contains(&value) {
            Some(Codon(value as i8))
        } else {
            None
        }
    }

    pub fn value(self) -> i32 {
        self.0 as i32
    }
}

/// A strand of codons derived from DNA.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rna {
    codons: Vec<Codon>,
}

impl Rna {
    pub fn new(codons: Vec<Codon>) -> Self {
        Rna { codons }
    }

    /// Build a strand from raw codon values, `None` if any of them is out of range.
    pub fn try_from_values(values: &[i32]) -> Option<Rna> {
        let codons = values
            .iter()
            .map(|v| Codon::new(*v))
            .collect::<Option<Vec<_>>>()?;
        Some(Rna { codons })
    }

    pub fn codons(&self) -> &[Codon] {
        &self.codons
    }

    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.codons.iter().map(|c| c.value())
    }

    pub fn len(&self) -> usize {
        self.codons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }
}

impl fmt::Display for Rna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.values().map(|v| format!("{:+}", v)).collect();
        write!(f, "[{}]", values.join(" "))
    }
}

/// Sum the strand in non-overlapping triplets.
/// Up to two trailing base pairs that do not form a full triplet are dropped.
pub fn reduce(dna: &Dna) -> Rna {
    let codons = dna
        .nucleotides()
        .chunks_exact(3)
        .map(|triplet| Codon(triplet.iter().map(|n| n.magnitude() as i8).sum()))
        .collect();
    Rna { codons }
}
