// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Constants shaping a phrase, and the errors of setting them.

use snafu::Snafu;

use crate::effects::EffectsChain;
use crate::express::{DurationRules, PitchRules, VelocityRules};
use crate::note::Note;
use crate::rational::Rational;
use crate::time::{Seconds, Time, TimeSig};

/// Slider units per measure of loop length.
pub const SLIDER_UNITS_PER_MEASURE: f64 = 25.0;

/// Longest loop the engine accepts, in measures.
pub const MAX_LOOP_MEASURES: i64 = 4096;

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Number of base pairs drawn when seeding.
    pub gene_length: usize,
    pub time_sig: TimeSig,
    /// The first note of a phrase is this one transposed by the first codon.
    pub reference_pitch: Note,
    /// Length of the note before the first one, as a fraction of a whole note.
    pub reference_length: Time,
    /// Loop start in whole measures.
    pub loop_start: i64,
    /// Loop end in whole measures.
    pub loop_end: i64,
    /// Measure at which the phrase is scheduled, once per loop iteration.
    pub phrase_anchor: i64,
    pub pitch: PitchRules,
    pub velocity: VelocityRules,
    pub effects: EffectsChain,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            gene_length: 42,
            time_sig: TimeSig::common(180),
            reference_pitch: Note::D4,
            reference_length: Rational::nth(4),
            loop_start: 1,
            loop_end: 3,
            phrase_anchor: 1,
            pitch: PitchRules::default(),
            velocity: VelocityRules::default(),
            effects: EffectsChain::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gene_length == 0 {
            return Err(ConfigError::EmptyGene);
        }
        if self.time_sig.beats_per_minute <= 0 {
            return Err(ConfigError::InvalidTempo {
                bpm: self.time_sig.beats_per_minute,
            });
        }
        if self.pitch.lowest > self.pitch.highest {
            return Err(ConfigError::EmptyPitchBand {
                low: self.pitch.lowest.to_midi(),
                high: self.pitch.highest.to_midi(),
            });
        }
        if self.loop_end <= self.loop_start
            || self.loop_start < 0
            || self.loop_end > MAX_LOOP_MEASURES
        {
            return Err(ConfigError::InvalidLoop {
                start: self.loop_start,
                end: self.loop_end,
            });
        }
        if self.phrase_anchor < self.loop_start || self.phrase_anchor >= self.loop_end {
            return Err(ConfigError::AnchorOutsideLoop {
                anchor: self.phrase_anchor,
                start: self.loop_start,
                end: self.loop_end,
            });
        }
        let velocity = &self.velocity;
        // NaN fails every comparison and is rejected along with the rest
        let ordered = 0.0 <= velocity.silence
            && velocity.silence <= velocity.seed
            && velocity.seed <= 1.0;
        if !ordered || !velocity.divisor.is_finite() || velocity.divisor == 0.0 {
            return Err(ConfigError::InvalidVelocity {
                seed: velocity.seed,
                silence: velocity.silence,
                divisor: velocity.divisor,
            });
        }
        Ok(())
    }

    pub fn duration_rules(&self) -> DurationRules {
        DurationRules::for_time_sig(self.time_sig)
    }

    pub fn reference_duration(&self) -> Seconds {
        self.time_sig.seconds(self.reference_length)
    }

    pub fn anchor_time(&self) -> Seconds {
        self.time_sig.measures(self.phrase_anchor)
    }
}

/// Look up a reference pitch by name, e.g. `D4` or `F#3`.
pub fn parse_reference(name: &str) -> Result<Note, ConfigError> {
    Note::named_str(name).ok_or_else(|| ConfigError::UnknownNote {
        name: name.to_owned(),
    })
}

/// Convert a loop-length slider position into whole measures.
///
/// ```
/// # use viriditas::config::measures_from_slider;
///
/// assert_eq!(measures_from_slider(50.0), Ok(2));
/// assert_eq!(measures_from_slider(51.0), Ok(3));
/// assert_eq!(measures_from_slider(0.0), Ok(0));
/// assert!(measures_from_slider(-1.0).is_err());
/// assert!(measures_from_slider(1e300).is_err());
/// ```
pub fn measures_from_slider(value: f64) -> Result<i64, ConfigError> {
    let max = MAX_LOOP_MEASURES as f64 * SLIDER_UNITS_PER_MEASURE;
    if !value.is_finite() || value < 0.0 || value > max {
        return Err(ConfigError::InvalidSlider { value });
    }
    Ok((value / SLIDER_UNITS_PER_MEASURE).ceil() as i64)
}

/// Text shown next to the loop-length slider.
pub fn loop_label(measures: i64) -> String {
    format!("{}m", measures)
}

/// Possible errors when configuring the phrase engine.
#[derive(Debug, PartialEq, Snafu)]
pub enum ConfigError {
    #[snafu(display("Unknown reference note {:?}", name))]
    UnknownNote { name: String },
    #[snafu(display("Tempo must be positive, got {} bpm", bpm))]
    InvalidTempo { bpm: i64 },
    #[snafu(display("The gene must contain at least one base pair"))]
    EmptyGene,
    #[snafu(display("Pitch band from {} to {} is empty", low, high))]
    EmptyPitchBand { low: u8, high: u8 },
    #[snafu(display("Loop from measure {} to {} is empty", start, end))]
    InvalidLoop { start: i64, end: i64 },
    #[snafu(display(
        "Phrase anchor at measure {} is outside the loop from {} to {}",
        anchor,
        start,
        end
    ))]
    AnchorOutsideLoop { anchor: i64, start: i64, end: i64 },
    #[snafu(display(
        "Velocity rules need 0 <= silence ({}) <= seed ({}) <= 1 and a finite non-zero divisor ({})",
        silence,
        seed,
        divisor
    ))]
    InvalidVelocity { seed: f64, silence: f64, divisor: f64 },
    #[snafu(display(
        "Slider value {} is not between 0 and {}",
        value,
        MAX_LOOP_MEASURES as f64 * SLIDER_UNITS_PER_MEASURE
    ))]
    InvalidSlider { value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.reference_duration(), Rational::new(1, 3));
        assert_eq!(config.anchor_time(), Rational::new(4, 3));
    }

    #[test]
    fn rejects_broken_settings() {
        let mut config = EngineConfig::default();
        config.gene_length = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyGene));

        let mut config = EngineConfig::default();
        config.time_sig.beats_per_minute = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTempo { bpm: 0 }));

        let mut config = EngineConfig::default();
        config.pitch.lowest = Note::from_midi(90);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPitchBand { low: 90, high: 86 })
        );

        let mut config = EngineConfig::default();
        config.loop_end = 1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLoop { start: 1, end: 1 })
        );

        let mut config = EngineConfig::default();
        config.loop_end = MAX_LOOP_MEASURES + 1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLoop { .. })));
    }

    #[test]
    fn anchor_must_lie_in_the_loop() {
        let mut config = EngineConfig::default();
        config.phrase_anchor = 5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::AnchorOutsideLoop { anchor: 5, start: 1, end: 3 })
        );
        config.phrase_anchor = 0;
        assert!(config.validate().is_err());
        config.phrase_anchor = 2;
        assert_eq!(config.validate(), Ok(()));
        config.phrase_anchor = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn velocity_rules_are_checked() {
        let broken = [
            VelocityRules { silence: -1.0, ..VelocityRules::default() },
            VelocityRules { silence: 0.8, ..VelocityRules::default() },
            VelocityRules { seed: 1.5, ..VelocityRules::default() },
            VelocityRules { seed: f64::NAN, ..VelocityRules::default() },
            VelocityRules { divisor: 0.0, ..VelocityRules::default() },
            VelocityRules { divisor: f64::INFINITY, ..VelocityRules::default() },
        ];
        for rules in broken.iter() {
            let config = EngineConfig {
                velocity: *rules,
                ..EngineConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidVelocity { .. })),
                "{:?} accepted",
                rules
            );
        }
    }

    #[test]
    fn reference_names() {
        assert_eq!(parse_reference("D4"), Ok(Note::D4));
        let err = parse_reference("X9").unwrap_err();
        assert_eq!(err.to_string(), "Unknown reference note \"X9\"");
    }

    #[test]
    fn slider_rejects_nan() {
        assert!(measures_from_slider(f64::NAN).is_err());
        assert!(measures_from_slider(f64::INFINITY).is_err());
        assert!(measures_from_slider(1e300).is_err());
        assert_eq!(measures_from_slider(102_400.0), Ok(MAX_LOOP_MEASURES));
        assert!(measures_from_slider(102_400.5).is_err());
        assert_eq!(loop_label(measures_from_slider(99.0).unwrap()), "4m");
    }
}
