// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Codons as dynamics.

use crate::note::Velocity;
use crate::rna::Rna;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VelocityRules {
    /// Starting loudness, also used to recover from silence.
    pub seed: f64,
    /// Anything quieter becomes a rest.
    pub silence: f64,
    /// Codon values are divided by this before being added.
    pub divisor: f64,
}

impl Default for VelocityRules {
    fn default() -> Self {
        VelocityRules {
            seed: 0.7,
            silence: 0.3,
            divisor: 10.0,
        }
    }
}

/// Chain the codons into velocities.
///
/// A silent note never silences the next one: the running value restarts from
/// `rules.seed` whenever it hit zero. The result stays in `0..=1` even for
/// rules rejected by `EngineConfig::validate`.
pub fn to_velocity(rna: &Rna, rules: &VelocityRules) -> Vec<Velocity> {
    let mut previous = rules.seed;
    rna.values()
        .map(|value| {
            if previous == 0.0 {
                previous = rules.seed;
            }
            previous += value as f64 / rules.divisor;
            if previous.is_nan() || previous < rules.silence || previous < 0.0 {
                previous = 0.0;
            }
            if previous > 1.0 {
                previous = 1.0;
            }
            Velocity::from_f64(previous)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn velocities(values: &[i32]) -> Vec<f64> {
        let rna = Rna::try_from_values(values).unwrap();
        to_velocity(&rna, &VelocityRules::default())
            .into_iter()
            .map(Velocity::as_f64)
            .collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn broken_rules_still_give_valid_velocities() {
        let rna = Rna::try_from_values(&[-4, -4, 6, 0]).unwrap();
        let rules = VelocityRules {
            seed: 0.5,
            silence: -1.0,
            divisor: 10.0,
        };
        let velocities: Vec<f64> = to_velocity(&rna, &rules)
            .into_iter()
            .map(Velocity::as_f64)
            .collect();
        assert_eq!(velocities.len(), 4);
        assert!(velocities.iter().all(|v| (0.0..=1.0).contains(v)));

        let rules = VelocityRules {
            divisor: 0.0,
            ..VelocityRules::default()
        };
        assert!(to_velocity(&rna, &rules).iter().all(|v| (0.0..=1.0).contains(&v.as_f64())));
    }

    #[test]
    fn deltas_accumulate() {
        assert_close(&velocities(&[1, 1, -2]), &[0.8, 0.9, 0.7]);
    }

    #[test]
    fn clamped_at_full_velocity() {
        assert_close(&velocities(&[6, 2, -1]), &[1.0, 1.0, 0.9]);
    }

    #[test]
    fn quiet_notes_become_silent() {
        assert_close(&velocities(&[-4]), &[0.0]);
        assert_close(&velocities(&[-2, -2]), &[0.5, 0.0]);
    }

    #[test]
    fn silence_does_not_lock_in() {
        // after each rest the next note starts again from 0.7
        assert_close(&velocities(&[-6, -6, 1, -6, 0]), &[0.0, 0.0, 0.8, 0.0, 0.7]);
        let out = velocities(&[-6, -6, -6, -6, 3]);
        assert!(out[4] > 0.0);
    }

    #[test]
    fn output_is_silent_or_audible() {
        let out = velocities(&[3, -6, 2, -4, -1, 6, 6, -3, 0, -2, 1, -5]);
        assert_eq!(out.len(), 12);
        for v in out {
            assert!(v == 0.0 || (0.3..=1.0).contains(&v), "{}", v);
        }
    }

    #[test]
    fn empty_rna() {
        assert!(velocities(&[]).is_empty());
    }

    #[test]
    fn pure() {
        let values = [3, -2, 6, 1, -1, 0];
        assert_eq!(velocities(&values), velocities(&values));
    }
}
