// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Description of the fixed signal chain the audio engine builds behind the voice.

use crate::note::Note;
use crate::rational::Rational;

/// One processing stage. Times are in seconds unless a note length is given.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Chorus {
        depth: f64,
    },
    PingPongDelay {
        /// Delay time as a fraction of a whole note.
        delay: Rational,
        /// Play the delay as a triplet of `delay`.
        triplet: bool,
        feedback: f64,
        wet: f64,
    },
    Reverb {
        decay: f64,
        pre_delay: f64,
        wet: f64,
    },
    LowPass {
        cutoff: Note,
    },
    Compressor {
        threshold_db: f64,
        ratio: f64,
    },
    Volume {
        gain_db: f64,
    },
}

/// Which synthesis method the single voice uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoiceKind {
    /// Amplitude modulation synthesizer.
    AmSynth,
}

/// The voice followed by its effects, in signal order.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectsChain {
    pub voice: VoiceKind,
    pub stages: Vec<Effect>,
}

impl Default for EffectsChain {
    fn default() -> Self {
        EffectsChain {
            voice: VoiceKind::AmSynth,
            stages: vec![
                Effect::Chorus { depth: 0.7 },
                Effect::PingPongDelay {
                    delay: Rational::nth(4),
                    triplet: true,
                    feedback: 0.7,
                    wet: 0.5,
                },
                Effect::Reverb {
                    decay: 2.0,
                    pre_delay: 0.25,
                    wet: 0.5,
                },
                Effect::LowPass {
                    cutoff: Note::from_midi(69),
                },
                Effect::Compressor {
                    threshold_db: -8.0,
                    ratio: 4.0,
                },
                Effect::Volume { gain_db: 3.0 },
            ],
        }
    }
}
