// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Musical time and its conversion to absolute time.

use crate::rational::Rational;

/// Time in measures, can be fractional, e.g. a quarter note taking 1/4.
pub type Time = Rational;

/// Absolute time in seconds, kept exact.
pub type Seconds = Rational;

/// Time signature of the phrase, consisting of
/// - the number of beats per minute,
/// - the length of a single beat,
/// - the number of beats per measure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeSig {
    /// How many beats per minute
    pub beats_per_minute: i64,
    /// The length of one beat is `1 / beat_unit`.
    pub beat_unit: i64,
    /// How many beats fill one measure.
    pub beats_per_measure: i64,
}

impl TimeSig {
    /// Common time at the given tempo.
    pub fn common(beats_per_minute: i64) -> TimeSig {
        TimeSig {
            beats_per_minute,
            beat_unit: 4,
            beats_per_measure: 4,
        }
    }

    /// Convert a note length (a fraction of a whole note) to seconds.
    ///
    /// ```
    /// # use viriditas::rational::Rational;
    /// # use viriditas::time::TimeSig;
    ///
    /// let sig = TimeSig::common(180);
    /// assert_eq!(sig.seconds(Rational::new(1, 4)), Rational::new(1, 3));
    /// assert_eq!(sig.seconds(Rational::new(1, 16)), Rational::new(1, 12));
    /// ```
    pub fn seconds(&self, note_time: Time) -> Seconds {
        note_time * self.beat_unit * 60 / self.beats_per_minute
    }

    /// Length of `count` whole measures in seconds.
    ///
    /// ```
    /// # use viriditas::rational::Rational;
    /// # use viriditas::time::TimeSig;
    ///
    /// assert_eq!(TimeSig::common(180).measures(3), Rational::int(4));
    /// ```
    pub fn measures(&self, count: i64) -> Seconds {
        self.seconds(Rational::new(self.beats_per_measure * count, self.beat_unit))
    }
}
