// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This namespace contains the three mappers turning RNA into musical parameters.
//!
//! Each mapper is a pure function of the codons and its reference value, every
//! element depending on the one before it.

pub mod duration;
pub mod pitch;
pub mod velocity;

use crate::config::EngineConfig;
use crate::note::{Note, Velocity};
use crate::rna::Rna;
use crate::time::Seconds;

pub use duration::{to_duration, DurationRules};
pub use pitch::{to_pitch, PitchRules};
pub use velocity::{to_velocity, VelocityRules};

/// Pitch, duration and velocity streams of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression {
    pub pitch: Vec<Note>,
    pub duration: Vec<Seconds>,
    pub velocity: Vec<Velocity>,
}

impl Expression {
    pub fn len(&self) -> usize {
        self.pitch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitch.is_empty()
    }
}

/// Run all three mappers over the same strand.
pub fn express(rna: &Rna, config: &EngineConfig) -> Expression {
    let duration_rules = config.duration_rules();
    Expression {
        pitch: to_pitch(rna, config.reference_pitch, &config.pitch),
        duration: to_duration(rna, config.reference_duration(), &duration_rules),
        velocity: to_velocity(rna, &config.velocity),
    }
}
