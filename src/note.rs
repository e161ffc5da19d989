// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a note is.

use std::fmt;

/// A "note" is just an index on the synthesizers keyboard.
/// This definition follows the MIDI standard where C4 corresponds to index 60.
///
/// Note indices range from 0 to 127.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Note(u8);

/// The name of a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoteName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// Any offset applied to a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoteOffset {
    /// The note is a half-tone lower then indicated by its name.
    Flat,
    /// The note is left unchanged.
    Base,
    /// The note is a half-tone higher then indicated by its name.
    Sharp,
}

/// Names of the twelve pitch classes starting from C, spelled with sharps.
const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl Note {
    /// The central reference pitch of a phrase.
    pub const D4: Note = Note(62);

    /// Convert a note from standard notation to a MIDI note index.
    /// Returns `None` if the note is not representable in the MIDI note system.
    ///
    /// # Examples
    ///
    /// ```
    /// use viriditas::note::*;
    ///
    /// assert_eq!(Note::try_named(NoteName::D, NoteOffset::Base, 4), Some(Note::D4));
    /// assert_eq!(Note::try_named(NoteName::C, NoteOffset::Sharp, 6), Some(Note::from_midi(85)));
    /// assert_eq!(Note::try_named(NoteName::G, NoteOffset::Flat, 2), Some(Note::from_midi(42)));
    /// assert_eq!(Note::try_named(NoteName::C, NoteOffset::Base, 12), None);
    /// ```
    pub fn try_named(name: NoteName, offset: NoteOffset, octave: i32) -> Option<Note> {
        let name_index = match name {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        };
        let offset_index = match offset {
            NoteOffset::Base => 0,
            NoteOffset::Flat => -1,
            NoteOffset::Sharp => 1,
        };
        // C4 is MIDI note number 60
        let normalize_index = 60 - 4 * 12;
        let note_index = octave * 12 + name_index + offset_index + normalize_index;
        Note::try_from_midi(note_index as i64)
    }

    /// Parse a name string of the format `<letter><offset><octave>`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use viriditas::note::*;
    ///
    /// assert_eq!(Note::named_str("D4"), Some(Note::D4));
    /// assert_eq!(Note::named_str("a4"), Some(Note::from_midi(69)));
    /// assert_eq!(Note::named_str("Csharp6"), Some(Note::from_midi(85)));
    /// assert_eq!(Note::named_str("C#6"), Some(Note::from_midi(85)));
    /// assert_eq!(Note::named_str("Gb2"), Some(Note::from_midi(42)));
    /// assert_eq!(Note::named_str("H2"), None);
    /// ```
    pub fn named_str(name_str: &str) -> Option<Note> {
        let mut name_chars = name_str.chars();
        let name_ch = name_chars.next()?;
        let name = match name_ch.to_ascii_uppercase() {
            'A' => NoteName::A,
            'B' => NoteName::B,
            'C' => NoteName::C,
            'D' => NoteName::D,
            'E' => NoteName::E,
            'F' => NoteName::F,
            'G' => NoteName::G,
            _ => return None,
        };

        let offset_str = name_chars
            .as_str()
            .trim_end_matches(|ch: char| ch.is_ascii_digit() || ch == '-');
        let offset = match offset_str {
            "sharp" | "♯" | "#" => NoteOffset::Sharp,
            "flat" | "♭" | "b" => NoteOffset::Flat,
            "" => NoteOffset::Base,
            _ => return None,
        };

        let octave_str = &name_chars.as_str()[offset_str.len()..];
        let octave = octave_str.parse().ok()?;
        Note::try_named(name, offset, octave)
    }

    /// # Panics
    ///
    /// If `midi_note` is not a valid MIDI note index.
    pub fn from_midi(midi_note: u8) -> Note {
        assert!(midi_note < 128, "MIDI only has notes 0 - 127");
        Note(midi_note)
    }

    pub fn try_from_midi(midi_note: i64) -> Option<Note> {
        if (0..128).contains(&midi_note) {
            Some(Note(midi_note as u8))
        } else {
            None
        }
    }

    pub fn to_midi(self) -> u8 {
        self.0
    }

    /// Return the note index in a signed type, convenient for further calculations.
    pub fn index(self) -> i32 {
        self.0 as i32
    }

    /// Move the note by a signed number of semitones.
    /// The result saturates at the ends of the MIDI keyboard.
    ///
    /// ```
    /// # use viriditas::note::*;
    ///
    /// assert_eq!(Note::D4.transpose(3), Note::from_midi(65));
    /// assert_eq!(Note::D4.transpose(-4), Note::from_midi(58));
    /// assert_eq!(Note::from_midi(125).transpose(6), Note::from_midi(127));
    /// ```
    pub fn transpose(self, semitones: i32) -> Note {
        Note((self.index() + semitones).max(0).min(127) as u8)
    }

    /// The octave in scientific pitch notation, C4 being the middle C.
    pub fn octave(self) -> i32 {
        self.index() / 12 - 1
    }
}

/// ```
/// # use viriditas::note::*;
///
/// assert_eq!(Note::D4.to_string(), "D4");
/// assert_eq!(Note::from_midi(61).to_string(), "C#4");
/// assert_eq!(Note::from_midi(0).to_string(), "C-1");
/// ```
impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            PITCH_CLASS_NAMES[self.0 as usize % 12],
            self.octave()
        )
    }
}

/// The velocity of a voice indicates how hard/fast the key was pressed down.
/// A normalized float between 0.0 and 1.0 inclusive.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Velocity(f64);

impl Velocity {
    pub const MAX: Velocity = Velocity(1.0);
    pub const MIN: Velocity = Velocity(0.0);

    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Convert a floating point value in the interval [0, 1] to a velocity.
    ///
    /// # Panics
    ///
    /// This function panics if `velocity` is not in the inclusive interval [0, 1].
    ///
    /// # Examples
    ///
    /// ```
    /// use viriditas::note::*;
    ///
    /// assert_eq!(Velocity::from_f64(1.0), Velocity::MAX);
    /// ```
    pub fn from_f64(velocity: f64) -> Velocity {
        if let Some(v) = Self::try_from_f64(velocity) {
            v
        } else {
            panic!("{} out of range", velocity);
        }
    }

    pub fn try_from_f64(velocity: f64) -> Option<Velocity> {
        if velocity.is_nan() || !(0.0..=1.0).contains(&velocity) {
            return None;
        }
        Some(Velocity(velocity))
    }

    /// A velocity of zero produces no sound.
    pub fn is_silent(self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
