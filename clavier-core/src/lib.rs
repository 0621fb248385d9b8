//! Next-word prediction for a French AZERTY keyboard.
//!
//! This crate combines:
//! - Word n-gram models (unigram, bigram, trigram) learned from a corpus
//! - A keystroke error model derived from AZERTY key adjacency
//! - Grammatical heuristics re-ranking candidate transitions
//! - A typing session routing key presses to word matching or prediction
//!
//! Training produces an immutable [`Predictor`]; sessions share it through an
//! `Arc` and keep only their own typed text.

/// Error type and result alias.
pub mod error;

/// Tunable weights, thresholds and probabilities.
pub mod config;

/// Text normalization and word tokenization.
pub mod tokenizer;

/// AZERTY key adjacency table.
pub mod keyboard;

/// Statistical models, scoring and matching.
pub mod model;

/// Trained predictor and sentence-level completion.
pub mod predictor;

/// Key-event driven typing session.
pub mod session;

/// Built-in corpus and sentence extraction helpers.
pub mod corpus;

/// File helpers for loading corpora.
pub mod io;

pub use config::PredictorConfig;
pub use error::{ClavierError, Result};
pub use predictor::{PredictionOutcome, PredictionStatus, Predictor, TextPredictor};
pub use session::{KeyEvent, Session, SessionSnapshot};
