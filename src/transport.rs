// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The capabilities expected from the audio engine that actually makes sound.

use crate::effects::EffectsChain;
use crate::note::{Note, Velocity};
use crate::time::Seconds;

/// Identifies a callback registered with a transport.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScheduleHandle(pub u64);

/// Invoked with the absolute time at which the scheduled transport position is reached.
pub type Callback = Box<dyn FnMut(Seconds)>;

/// A clock that runs, loops over a region, and calls back at fixed positions.
///
/// Positions are transport times in seconds, measured from the transport start.
pub trait Transport {
    fn start(&mut self);
    fn stop(&mut self);
    fn set_looping(&mut self, looping: bool);
    fn set_loop_points(&mut self, start: Seconds, end: Seconds);
    /// Call `callback` every time the transport passes `at`.
    fn schedule(&mut self, at: Seconds, callback: Callback) -> ScheduleHandle;
    /// Remove a scheduled callback. Unknown handles are ignored.
    fn clear(&mut self, handle: ScheduleHandle);
    fn is_scheduled(&self, handle: ScheduleHandle) -> bool;
    fn scheduled_count(&self) -> usize;
    /// Build the signal chain behind the voice.
    fn connect(&mut self, _chain: &EffectsChain) {}
}

/// A monophonic instrument.
pub trait Voice {
    /// Press `note` at `time` and release it `duration` later.
    fn trigger_attack_release(
        &mut self,
        note: Note,
        duration: Seconds,
        time: Seconds,
        velocity: Velocity,
    );
}
