pub mod config;
pub mod dna;
pub mod effects;
pub mod engine;
pub mod express;
pub mod note;
pub mod phrase;
pub mod rna;
pub mod sim;
pub mod transport;

// Utility modules
pub mod rational;
pub mod time;
