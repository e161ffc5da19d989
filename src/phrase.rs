// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! A phrase is one pass through the expression streams, laid out in time.

use log::trace;

use crate::express::Expression;
use crate::note::{Note, Velocity};
use crate::time::Seconds;
use crate::transport::Voice;

/// Monophonic notes played back to back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Phrase {
    /// Sum of all note durations.
    length: Seconds,
    /// The notes in the order they are played.
    notes: Vec<PhraseNote>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhraseNote {
    /// Which key is pressed
    pub note: Note,
    /// How hard the key is pressed
    pub velocity: Velocity,
    /// Offset from the start of the phrase
    pub start: Seconds,
    /// How long the key is held
    pub duration: Seconds,
}

impl Phrase {
    pub fn new() -> Self {
        Phrase::default()
    }

    /// Zip the three streams, each note starting where the previous one ended.
    pub fn from_expression(expression: &Expression) -> Self {
        let mut phrase = Phrase::new();
        let notes = expression
            .pitch
            .iter()
            .zip(expression.duration.iter())
            .zip(expression.velocity.iter());
        for ((&note, &duration), &velocity) in notes {
            phrase.add_after(note, duration, velocity);
        }
        phrase
    }

    /// Add a note at the end of the phrase, extending its length.
    pub fn add_after(&mut self, note: Note, duration: Seconds, velocity: Velocity) {
        self.notes.push(PhraseNote {
            note,
            velocity,
            start: self.length,
            duration,
        });
        self.length += duration;
    }

    /// Trigger every note on `voice`, the phrase starting at `time`.
    pub fn play_at<V: Voice + ?Sized>(&self, time: Seconds, voice: &mut V) {
        for note in self.notes.iter() {
            let at = time + note.start;
            trace!(
                "{:>8.3}: play {} for {} s at {}",
                at.to_f64(),
                note.note,
                note.duration,
                note.velocity
            );
            voice.trigger_attack_release(note.note, note.duration, at, note.velocity);
        }
    }

    /// Iterate all notes in the order they are played.
    pub fn iter(&self) -> impl Iterator<Item = &PhraseNote> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn length(&self) -> Seconds {
        self.length
    }
}
