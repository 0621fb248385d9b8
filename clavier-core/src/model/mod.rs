//! Statistical models behind the predictions.
//!
//! - Word n-gram counts (`NGramModel`) and character transitions (`CharModel`)
//! - Keystroke error model of the keyboard (`EmissionMatrix`)
//! - Grammatical re-ranking heuristics (`grammar`)
//! - Next-word scoring (`Scorer`) and typo-tolerant lookup (`WordMatcher`)
//! - The frozen combination of all of them (`LanguageModel`)

/// Frozen model and the builder that trains it.
pub mod language_model;

/// Word unigram, bigram and trigram counts.
pub mod ngram_model;

/// Successor counts of one n-gram history.
///
/// Shared by the bigram and trigram tables, supports weighted sampling.
pub mod state;

/// Character-level transition probabilities.
pub mod char_model;

/// Keystroke emission probabilities derived from key adjacency.
pub mod emission;

/// Coarse word classes and transition compatibility scores.
pub mod grammar;

/// Prior word frequencies.
pub mod dictionary;

/// Typo-tolerant matching of typed tokens against the dictionary.
pub mod matcher;

/// Next-word candidate scoring, merging and ranking.
pub mod scorer;

/// Random sentence generation for demonstrations.
pub mod generator;
