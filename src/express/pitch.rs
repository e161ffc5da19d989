// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Codons as melodic intervals.

use crate::note::Note;
use crate::rna::Rna;

/// Constraints applied to every pitch after the first one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PitchRules {
    /// Lowest allowed note, inclusive.
    pub lowest: Note,
    /// Highest allowed note, inclusive.
    pub highest: Note,
    /// Notes outside the scale, each is moved up by a semitone.
    pub disallowed: Vec<Note>,
}

/// MIDI indices of the black keys between D2 and D6.
const BLACK_KEYS_D2_D6: [u8; 20] = [
    39, 42, 44, 46, 49, 51, 54, 56, 58, 61, 63, 66, 68, 70, 73, 75, 78, 80, 82, 85,
];

impl Default for PitchRules {
    /// Two octaves around D4, quantized to C major.
    fn default() -> Self {
        PitchRules {
            lowest: Note::from_midi(38),
            highest: Note::from_midi(86),
            disallowed: BLACK_KEYS_D2_D6.iter().map(|&i| Note::from_midi(i)).collect(),
        }
    }
}

impl PitchRules {
    pub fn in_band(&self, note: Note) -> bool {
        self.lowest <= note && note <= self.highest
    }

    pub fn in_scale(&self, note: Note) -> bool {
        !self.disallowed.contains(&note)
    }

    /// Apply `interval` to `previous`, inverting it once if the band is left and
    /// then bumping an out-of-scale result by one semitone.
    /// Neither correction is re-validated.
    pub fn step(&self, previous: Note, interval: i32) -> Note {
        let mut note = previous.transpose(interval);
        if !self.in_band(note) {
            note = previous.transpose(-interval);
        }
        if !self.in_scale(note) {
            note = note.transpose(1);
        }
        note
    }
}

/// Walk the codons as intervals starting from `reference`.
///
/// The first codon transposes the reference as is, the band and scale are only
/// enforced from the second note on.
pub fn to_pitch(rna: &Rna, reference: Note, rules: &PitchRules) -> Vec<Note> {
    let mut values = rna.values();
    let first = match values.next() {
        Some(interval) => reference.transpose(interval),
        None => return Vec::new(),
    };
    let mut pitches = Vec::with_capacity(rna.len());
    pitches.push(first);
    let mut previous = first;
    for interval in values {
        previous = rules.step(previous, interval);
        pitches.push(previous);
    }
    pitches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitches(values: &[i32], reference: u8) -> Vec<u8> {
        let rna = Rna::try_from_values(values).unwrap();
        to_pitch(&rna, Note::from_midi(reference), &PitchRules::default())
            .into_iter()
            .map(Note::to_midi)
            .collect()
    }

    #[test]
    fn intervals_accumulate() {
        // C#4 and D#4 are raised to the next white key
        assert_eq!(pitches(&[2, 0, -3], 62), vec![64, 64, 62]);
        assert_eq!(pitches(&[0, 2, 1], 60), vec![60, 62, 64]);
        assert_eq!(pitches(&[0, 2, 2], 60), vec![60, 62, 64]);
    }

    #[test]
    fn out_of_scale_note_is_raised() {
        // D4 +3 +0 -4: F4, F4, C#4 which is raised to D4
        assert_eq!(pitches(&[3, 0, -4], 62), vec![65, 65, 62]);
    }

    #[test]
    fn first_note_is_not_corrected() {
        // D4 + 6 = G#4 is out of scale but stays
        assert_eq!(pitches(&[6], 62)[0], 68);
    }

    #[test]
    fn leaving_the_band_inverts_the_interval() {
        // 68, 74, 80 -> 81, 87 is above D6 so 81 - 6 = 75 -> 76
        assert_eq!(pitches(&[6, 6, 6, 6], 62), vec![68, 74, 81, 76]);
        // 56, 50, 44 -> 45, 39 -> 40, 34 is below D2 so 40 + 6 = 46 -> 47
        assert_eq!(pitches(&[-6, -6, -6, -6, -6], 62), vec![56, 50, 45, 40, 47]);
    }

    #[test]
    fn inverted_interval_may_stay_out_of_band() {
        // starting far above the band, the single inversion is not enough
        assert_eq!(pitches(&[6, 1], 86), vec![92, 91]);
    }

    #[test]
    fn raised_note_is_not_range_checked() {
        let rules = PitchRules {
            lowest: Note::from_midi(38),
            highest: Note::from_midi(85),
            disallowed: vec![Note::from_midi(85)],
        };
        let rna = Rna::try_from_values(&[0, 1]).unwrap();
        let out = to_pitch(&rna, Note::from_midi(84), &rules);
        assert_eq!(out, vec![Note::from_midi(84), Note::from_midi(86)]);
    }

    #[test]
    fn empty_rna() {
        assert!(pitches(&[], 62).is_empty());
    }

    #[test]
    fn pure() {
        let rna = Rna::try_from_values(&[5, -3, 6, 6, -1, 0, 2]).unwrap();
        let rules = PitchRules::default();
        assert_eq!(to_pitch(&rna, Note::D4, &rules), to_pitch(&rna, Note::D4, &rules));
    }
}
