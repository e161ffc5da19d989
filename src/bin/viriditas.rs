// viriditas -- a generative music toy growing phrases from synthetic DNA
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `viriditas` grows a phrase from a gene and prints what the voice plays on
//! the offline engine.

use std::error::Error;

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use structopt::StructOpt;

use viriditas::config::{self, EngineConfig};
use viriditas::engine::PhraseEngine;
use viriditas::sim::{RecordingVoice, SimTransport};
use viriditas::time::TimeSig;

#[derive(Debug, StructOpt)]
#[structopt(name = "viriditas", about = "Growing music from synthetic DNA")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Seed of the random number generator. Drawn from the OS if not given.
    #[structopt(long)]
    seed: Option<u64>,

    /// Grow the phrase from this text instead of a random gene.
    #[structopt(long)]
    sow: Option<String>,

    /// Number of base pairs of a random gene.
    #[structopt(long, default_value = "42")]
    gene_length: usize,

    #[structopt(long, default_value = "180")]
    bpm: i64,

    /// Pitch the phrase starts from, e.g. `D4` or `F#3`.
    #[structopt(long, default_value = "D4")]
    reference: String,

    /// Position of the loop-length slider, 25 per measure.
    #[structopt(long)]
    slider: Option<f64>,

    /// Number of loop iterations to play.
    #[structopt(short, long, default_value = "2")]
    loops: i64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level)?;

    let engine_config = EngineConfig {
        gene_length: opt.gene_length,
        time_sig: TimeSig::common(opt.bpm),
        reference_pitch: config::parse_reference(&opt.reference)?,
        ..EngineConfig::default()
    };
    let rng = match opt.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut engine =
        PhraseEngine::new(engine_config, SimTransport::new(), RecordingVoice::new(), rng)?;
    match &opt.sow {
        Some(text) => engine.sow(text),
        None => engine.seed(),
    }
    if let Some(value) = opt.slider {
        info!("loop length {}", engine.set_loop_slider(value)?);
    }
    engine.play();

    println!("dna {}", engine.dna_display());
    println!("rna {}", engine.rna());

    let sig = engine.config().time_sig;
    let loop_start = sig.measures(engine.config().loop_start);
    let loop_length = sig.measures(engine.loop_end()) - loop_start;
    engine
        .transport_mut()
        .advance(loop_start + loop_length * opt.loops.max(0));
    engine.stop();

    for played in engine.voice().borrow().notes() {
        let what = if played.velocity.is_silent() {
            "rest".to_string()
        } else {
            played.note.to_string()
        };
        println!(
            "{:>8.3}  {:<4} {:>5} s  {}",
            played.time.to_f64(),
            what,
            played.duration.to_string(),
            played.velocity
        );
    }
    Ok(())
}
