// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The phrase engine owns a gene and everything grown from it, and keeps the
//! transport playing the current phrase.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use rand::Rng;

use crate::config::{self, ConfigError, EngineConfig};
use crate::dna::Dna;
use crate::express::{self, Expression};
use crate::phrase::Phrase;
use crate::rna::{self, Rna};
use crate::transport::{ScheduleHandle, Transport, Voice};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlayState {
    Stopped,
    Playing,
}

/// Drives `transport` and `voice` with the phrase grown from the current gene.
///
/// Every operation replacing the gene or its products stops playback first, so
/// the scheduled phrase never sees a half-updated state.
pub struct PhraseEngine<T, V, R> {
    config: EngineConfig,
    transport: T,
    voice: Rc<RefCell<V>>,
    rng: R,
    dna: Dna,
    rna: Rna,
    expression: Expression,
    phrase: Phrase,
    state: PlayState,
    scheduled: Option<ScheduleHandle>,
    loop_end: i64,
}

impl<T, V, R> PhraseEngine<T, V, R>
where
    T: Transport,
    V: Voice + 'static,
    R: Rng,
{
    /// Set up the transport loop and the signal chain. Nothing is scheduled yet.
    pub fn new(
        config: EngineConfig,
        mut transport: T,
        voice: V,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        transport.set_looping(true);
        transport.set_loop_points(
            config.time_sig.measures(config.loop_start),
            config.time_sig.measures(config.loop_end),
        );
        transport.connect(&config.effects);
        info!(
            "phrase engine at {} bpm, looping measures {} to {}",
            config.time_sig.beats_per_minute, config.loop_start, config.loop_end
        );
        let loop_end = config.loop_end;
        Ok(PhraseEngine {
            config,
            transport,
            voice: Rc::new(RefCell::new(voice)),
            rng,
            dna: Dna::default(),
            rna: Rna::default(),
            expression: Expression::default(),
            phrase: Phrase::new(),
            state: PlayState::Stopped,
            scheduled: None,
            loop_end,
        })
    }

    /// Grow a first random phrase and play it.
    pub fn start(&mut self) {
        self.seed();
        self.play();
    }

    // ==================== Regeneration ====================

    /// Replace the gene with a random one.
    pub fn seed(&mut self) {
        self.halt();
        self.dna = Dna::random(self.config.gene_length, &mut self.rng);
        info!("seed {}", self.dna);
        self.weave();
        self.recombine();
    }

    /// Replace the gene with one decoded from `text`.
    pub fn sow(&mut self, text: &str) {
        self.halt();
        self.dna = Dna::decode(text, &mut self.rng);
        info!("sow {:?} as {}", text, self.dna);
        self.weave();
        self.recombine();
    }

    /// Recompute RNA and the expression streams from the current gene.
    pub fn weave(&mut self) {
        self.halt();
        self.rna = rna::reduce(&self.dna);
        self.expression = express::express(&self.rna, &self.config);
        self.phrase = Phrase::from_expression(&self.expression);
        debug!(
            "rna {} gives {} notes over {} s",
            self.rna,
            self.phrase.len(),
            self.phrase.length()
        );
    }

    /// Replace the scheduled phrase with the current one.
    pub fn recombine(&mut self) {
        self.unschedule();
        let phrase = self.phrase.clone();
        let voice = Rc::clone(&self.voice);
        let handle = self.transport.schedule(
            self.config.anchor_time(),
            Box::new(move |time| phrase.play_at(time, &mut *voice.borrow_mut())),
        );
        debug!("scheduled phrase as {:?}", handle);
        self.scheduled = Some(handle);
    }

    // ==================== Playback ====================

    /// Start the transport, scheduling the current phrase again if `stop` dropped it.
    pub fn play(&mut self) {
        if self.scheduled.is_none() {
            self.recombine();
        }
        self.state = PlayState::Playing;
        self.transport.set_looping(true);
        self.transport.start();
        info!("play");
    }

    /// Halt the transport and drop the scheduled phrase.
    pub fn stop(&mut self) {
        self.state = PlayState::Stopped;
        self.transport.set_looping(false);
        self.transport.stop();
        self.unschedule();
        info!("stop");
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlayState::Stopped => self.play(),
            PlayState::Playing => self.stop(),
        }
    }

    fn halt(&mut self) {
        if self.state == PlayState::Playing {
            self.stop();
        }
    }

    fn unschedule(&mut self) {
        if let Some(handle) = self.scheduled.take() {
            self.transport.clear(handle);
        }
    }

    // ==================== Loop length ====================

    /// Move the loop end according to the slider, returning the new label.
    pub fn set_loop_slider(&mut self, value: f64) -> Result<String, ConfigError> {
        let mut measures = config::measures_from_slider(value)?;
        // the loop has to contain the phrase anchor
        let last = std::cmp::max(self.config.loop_start, self.config.phrase_anchor);
        if measures <= last {
            warn!(
                "loop end {} would not pass measure {}, extending it",
                measures, last
            );
            measures = last + 1;
        }
        self.loop_end = measures;
        self.transport.set_loop_points(
            self.config.time_sig.measures(self.config.loop_start),
            self.config.time_sig.measures(measures),
        );
        self.recombine();
        Ok(self.loop_label())
    }

    pub fn loop_label(&self) -> String {
        config::loop_label(self.loop_end)
    }

    pub fn loop_end(&self) -> i64 {
        self.loop_end
    }

    // ==================== Accessors ====================

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dna(&self) -> &Dna {
        &self.dna
    }

    /// The gene as shown to the user.
    pub fn dna_display(&self) -> String {
        self.dna.to_string()
    }

    pub fn rna(&self) -> &Rna {
        &self.rna
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn phrase(&self) -> &Phrase {
        &self.phrase
    }

    pub fn scheduled(&self) -> Option<ScheduleHandle> {
        self.scheduled
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn voice(&self) -> &Rc<RefCell<V>> {
        &self.voice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use crate::rational::Rational;
    use crate::sim::{RecordingVoice, SimTransport};
    use rand::{rngs::StdRng, SeedableRng};

    type TestEngine = PhraseEngine<SimTransport, RecordingVoice, StdRng>;

    fn engine() -> TestEngine {
        PhraseEngine::new(
            EngineConfig::default(),
            SimTransport::new(),
            RecordingVoice::new(),
            StdRng::seed_from_u64(11),
        )
        .unwrap()
    }

    /// Three codons: +3, 0, -4.
    const GENE: &str = "GGAGAACAA";

    #[test]
    fn new_sets_up_the_loop() {
        let engine = engine();
        let (start, end) = engine.transport().loop_points();
        assert_eq!(start, Rational::new(4, 3));
        assert_eq!(end, Rational::int(4));
        assert!(engine.transport().chain().is_some());
        assert_eq!(engine.state(), PlayState::Stopped);
        assert_eq!(engine.loop_label(), "3m");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.gene_length = 0;
        let result = PhraseEngine::new(
            config,
            SimTransport::new(),
            RecordingVoice::new(),
            StdRng::seed_from_u64(0),
        );
        assert!(matches!(result, Err(ConfigError::EmptyGene)));
    }

    #[test]
    fn seed_grows_a_full_phrase() {
        let mut engine = engine();
        engine.seed();
        assert_eq!(engine.dna().len(), 42);
        assert_eq!(engine.rna().len(), 14);
        assert_eq!(engine.phrase().len(), 14);
        assert_eq!(engine.dna_display().len(), 42);
        assert_eq!(engine.transport().scheduled_count(), 1);
    }

    #[test]
    fn sow_decodes_text() {
        let mut engine = engine();
        engine.sow(GENE);
        assert_eq!(engine.dna_display(), GENE);
        assert_eq!(engine.rna().values().collect::<Vec<_>>(), vec![3, 0, -4]);
        assert_eq!(
            engine.expression().pitch,
            vec![Note::from_midi(65), Note::from_midi(65), Note::from_midi(62)]
        );
    }

    #[test]
    fn toggle_switches_state() {
        let mut engine = engine();
        engine.toggle();
        assert!(engine.is_playing());
        assert!(engine.transport().is_running());
        assert!(engine.transport().is_looping());
        engine.toggle();
        assert_eq!(engine.state(), PlayState::Stopped);
        assert!(!engine.transport().is_running());
        assert!(!engine.transport().is_looping());
    }

    #[test]
    fn stop_cancels_the_phrase() {
        let mut engine = engine();
        engine.start();
        let handle = engine.scheduled().unwrap();
        engine.stop();
        assert!(!engine.transport().is_scheduled(handle));
        assert_eq!(engine.scheduled(), None);
        assert_eq!(engine.transport().scheduled_count(), 0);
    }

    #[test]
    fn regeneration_stops_playback_first() {
        let mut engine = engine();
        engine.start();
        let old = engine.scheduled().unwrap();

        engine.seed();
        assert_eq!(engine.state(), PlayState::Stopped);
        assert!(!engine.transport().is_scheduled(old));
        assert_eq!(engine.transport().scheduled_count(), 1);

        engine.play();
        let old = engine.scheduled().unwrap();
        engine.sow(GENE);
        assert_eq!(engine.state(), PlayState::Stopped);
        assert!(!engine.transport().is_scheduled(old));
        assert_eq!(engine.transport().scheduled_count(), 1);

        engine.play();
        let old = engine.scheduled().unwrap();
        engine.weave();
        assert_eq!(engine.state(), PlayState::Stopped);
        assert!(!engine.transport().is_scheduled(old));
        assert_eq!(engine.transport().scheduled_count(), 0);
    }

    #[test]
    fn phrase_replays_every_loop() {
        let mut engine = engine();
        engine.sow(GENE);
        engine.play();
        // two loop iterations of two measures each, after the first measure
        let measure = Rational::new(4, 3);
        engine.transport_mut().advance(measure * 5);
        let notes = engine.voice().borrow_mut().take();
        assert_eq!(notes.len(), 6);

        let durations = &engine.expression().duration;
        let first = measure;
        let second = measure * 3;
        let expected_times = vec![
            first,
            first + durations[0],
            first + durations[0] + durations[1],
            second,
            second + durations[0],
            second + durations[0] + durations[1],
        ];
        let times: Vec<_> = notes.iter().map(|n| n.time).collect();
        assert_eq!(times, expected_times);
        assert_eq!(notes[3].note, Note::from_midi(65));
    }

    #[test]
    fn play_after_stop_resumes_the_phrase() {
        let mut engine = engine();
        engine.sow(GENE);
        engine.play();
        engine.stop();
        engine.play();
        assert_eq!(engine.transport().scheduled_count(), 1);
        engine.transport_mut().advance(Rational::int(2));
        assert_eq!(engine.voice().borrow().notes().len(), 3);
    }

    #[test]
    fn stopped_engine_plays_nothing() {
        let mut engine = engine();
        engine.start();
        engine.sow(GENE);
        engine.transport_mut().advance(Rational::int(20));
        assert!(engine.voice().borrow().notes().is_empty());
    }

    #[test]
    fn slider_moves_loop_end() {
        let mut engine = engine();
        engine.start();
        let old = engine.scheduled().unwrap();
        assert_eq!(engine.set_loop_slider(100.0), Ok("4m".to_string()));
        assert_eq!(engine.transport().loop_points().1, Rational::new(16, 3));
        assert!(!engine.transport().is_scheduled(old));
        assert_eq!(engine.transport().scheduled_count(), 1);
        assert!(engine.is_playing());
    }

    #[test]
    fn slider_keeps_loop_non_empty() {
        let mut engine = engine();
        assert_eq!(engine.set_loop_slider(10.0), Ok("2m".to_string()));
        assert_eq!(engine.loop_end(), 2);
        assert!(engine.set_loop_slider(-5.0).is_err());
        assert_eq!(engine.loop_end(), 2);
    }

    #[test]
    fn huge_slider_value_is_an_error() {
        let mut engine = engine();
        engine.start();
        assert!(matches!(
            engine.set_loop_slider(1e300),
            Err(ConfigError::InvalidSlider { .. })
        ));
        assert_eq!(engine.loop_end(), 3);
        assert_eq!(engine.transport().loop_points().1, Rational::int(4));
    }

    #[test]
    fn slider_keeps_anchor_inside_the_loop() {
        let config = EngineConfig {
            phrase_anchor: 2,
            ..EngineConfig::default()
        };
        let mut engine = PhraseEngine::new(
            config,
            SimTransport::new(),
            RecordingVoice::new(),
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        assert_eq!(engine.set_loop_slider(40.0), Ok("3m".to_string()));
    }

    #[test]
    fn broken_velocity_rules_are_rejected_up_front() {
        let mut config = EngineConfig::default();
        config.velocity.silence = -1.0;
        let result = PhraseEngine::new(
            config,
            SimTransport::new(),
            RecordingVoice::new(),
            StdRng::seed_from_u64(0),
        );
        assert!(matches!(result, Err(ConfigError::InvalidVelocity { .. })));
    }
}
