// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! An offline audio engine: a transport driven by hand and a voice that only
//! remembers what it was asked to play.

use log::debug;

use crate::effects::EffectsChain;
use crate::note::{Note, Velocity};
use crate::rational::Rational;
use crate::time::Seconds;
use crate::transport::{Callback, ScheduleHandle, Transport, Voice};

struct Scheduled {
    handle: ScheduleHandle,
    /// Transport position of the callback.
    at: Seconds,
    callback: Callback,
}

/// A transport whose time only moves on `advance`.
pub struct SimTransport {
    running: bool,
    looping: bool,
    loop_start: Seconds,
    loop_end: Seconds,
    /// Position on the transport timeline, reset by `stop`.
    position: Seconds,
    /// Absolute time, never reset.
    clock: Seconds,
    next_handle: u64,
    scheduled: Vec<Scheduled>,
    chain: Option<EffectsChain>,
}

impl SimTransport {
    pub fn new() -> Self {
        SimTransport {
            running: false,
            looping: false,
            loop_start: Rational::ZERO,
            loop_end: Rational::ZERO,
            position: Rational::ZERO,
            clock: Rational::ZERO,
            next_handle: 0,
            scheduled: Vec::new(),
            chain: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn loop_points(&self) -> (Seconds, Seconds) {
        (self.loop_start, self.loop_end)
    }

    pub fn position(&self) -> Seconds {
        self.position
    }

    pub fn clock(&self) -> Seconds {
        self.clock
    }

    pub fn chain(&self) -> Option<&EffectsChain> {
        self.chain.as_ref()
    }

    fn loop_active(&self) -> bool {
        self.looping && self.loop_end > self.loop_start
    }

    /// Let `span` seconds pass, firing every callback whose position is passed.
    pub fn advance(&mut self, span: Seconds) {
        let target = self.clock + span;
        while self.running && self.clock < target {
            if self.loop_active() && self.position >= self.loop_end {
                self.position = self.loop_start;
            }
            let mut step_end = self.position + (target - self.clock);
            if self.loop_active() {
                step_end = std::cmp::min(step_end, self.loop_end);
            }
            self.fire_between(self.position, step_end);
            self.clock += step_end - self.position;
            self.position = step_end;
        }
        self.clock = target;
    }

    /// Fire the callbacks positioned in `from..to`, earliest first.
    fn fire_between(&mut self, from: Seconds, to: Seconds) {
        let mut due: Vec<usize> = (0..self.scheduled.len())
            .filter(|&i| from <= self.scheduled[i].at && self.scheduled[i].at < to)
            .collect();
        due.sort_by_key(|&i| self.scheduled[i].at);
        for i in due {
            let time = self.clock + (self.scheduled[i].at - from);
            (self.scheduled[i].callback)(time);
        }
    }
}

impl Default for SimTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SimTransport {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
        self.position = Rational::ZERO;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_loop_points(&mut self, start: Seconds, end: Seconds) {
        self.loop_start = start;
        self.loop_end = end;
    }

    fn schedule(&mut self, at: Seconds, callback: Callback) -> ScheduleHandle {
        let handle = ScheduleHandle(self.next_handle);
        self.next_handle += 1;
        self.scheduled.push(Scheduled {
            handle,
            at,
            callback,
        });
        handle
    }

    fn clear(&mut self, handle: ScheduleHandle) {
        self.scheduled.retain(|s| s.handle != handle);
    }

    fn is_scheduled(&self, handle: ScheduleHandle) -> bool {
        self.scheduled.iter().any(|s| s.handle == handle)
    }

    fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    fn connect(&mut self, chain: &EffectsChain) {
        debug!("signal chain {:?} -> {:?}", chain.voice, chain.stages);
        self.chain = Some(chain.clone());
    }
}

/// A note as received by a voice.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggeredNote {
    pub note: Note,
    pub duration: Seconds,
    pub time: Seconds,
    pub velocity: Velocity,
}

/// A voice that records every triggered note.
#[derive(Clone, Debug, Default)]
pub struct RecordingVoice {
    notes: Vec<TriggeredNote>,
}

impl RecordingVoice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[TriggeredNote] {
        &self.notes
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<TriggeredNote> {
        std::mem::take(&mut self.notes)
    }
}

impl Voice for RecordingVoice {
    fn trigger_attack_release(
        &mut self,
        note: Note,
        duration: Seconds,
        time: Seconds,
        velocity: Velocity,
    ) {
        self.notes.push(TriggeredNote {
            note,
            duration,
            time,
            velocity,
        });
    }
}
