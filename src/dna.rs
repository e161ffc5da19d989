// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The synthetic gene every phrase grows from.

use std::fmt;

use rand::Rng;

/// A base pair, carrying a signed magnitude.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Nucleotide {
    /// Guanine, `+2`
    G,
    /// Cytosine, `-2`
    C,
    /// Thymine, `+1`
    T,
    /// Adenine, `-1`
    A,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Nucleotide::C, Nucleotide::A, Nucleotide::T, Nucleotide::G];

    pub fn magnitude(self) -> i32 {
        match self {
            Nucleotide::G => 2,
            Nucleotide::C => -2,
            Nucleotide::T => 1,
            Nucleotide::A => -1,
        }
    }

    pub fn from_magnitude(magnitude: i32) -> Option<Nucleotide> {
        match magnitude {
            2 => Some(Nucleotide::G),
            -2 => Some(Nucleotide::C),
            1 => Some(Nucleotide::T),
            -1 => Some(Nucleotide::A),
            _ => None,
        }
    }

    /// Only the upper case letters are recognized.
    pub fn from_char(ch: char) -> Option<Nucleotide> {
        match ch {
            'G' => Some(Nucleotide::G),
            'C' => Some(Nucleotide::C),
            'T' => Some(Nucleotide::T),
            'A' => Some(Nucleotide::A),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Nucleotide::G => 'G',
            Nucleotide::C => 'C',
            Nucleotide::T => 'T',
            Nucleotide::A => 'A',
        }
    }

    /// Draw one of the four base pairs uniformly.
    pub fn random<R: Rng>(rng: &mut R) -> Nucleotide {
        Nucleotide::ALL[rng.gen_range(0..Nucleotide::ALL.len())]
    }
}

/// Display glyph for a raw magnitude, `?` if it is not a base pair.
///
/// ```
/// # use viriditas::dna::strand_glyph;
///
/// assert_eq!(strand_glyph(2), 'G');
/// assert_eq!(strand_glyph(-1), 'A');
/// assert_eq!(strand_glyph(0), '?');
/// ```
pub fn strand_glyph(magnitude: i32) -> char {
    Nucleotide::from_magnitude(magnitude).map_or('?', Nucleotide::to_char)
}

/// An ordered strand of base pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dna {
    strand: Vec<Nucleotide>,
}

impl Dna {
    pub fn new(strand: Vec<Nucleotide>) -> Self {
        Dna { strand }
    }

    /// A strand of `length` independent uniform draws.
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        let strand = (0..length).map(|_| Nucleotide::random(rng)).collect();
        Dna { strand }
    }

    /// Translate text into a strand, one base pair per character.
    /// Characters other than `G`, `C`, `T` and `A` become a random base pair.
    ///
    /// ```
    /// # use viriditas::dna::Dna;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let dna = Dna::decode("GCTA", &mut rng);
    /// assert_eq!(dna.magnitudes().collect::<Vec<_>>(), vec![2, -2, 1, -1]);
    /// assert_eq!(Dna::decode("gattaca", &mut rng).len(), 7);
    /// ```
    pub fn decode<R: Rng>(text: &str, rng: &mut R) -> Self {
        let strand = text
            .chars()
            .map(|ch| Nucleotide::from_char(ch).unwrap_or_else(|| Nucleotide::random(rng)))
            .collect();
        Dna { strand }
    }

    pub fn len(&self) -> usize {
        self.strand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strand.is_empty()
    }

    pub fn nucleotides(&self) -> &[Nucleotide] {
        &self.strand
    }

    pub fn magnitudes(&self) -> impl Iterator<Item = i32> + '_ {
        self.strand.iter().map(|n| n.magnitude())
    }
}

impl fmt::Display for Dna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nucleotide in self.strand.iter() {
            write!(f, "{}", nucleotide.to_char())?;
        }
        Ok(())
    }
}
