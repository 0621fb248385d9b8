use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClavierError, Result};

/// Tunable parameters of the prediction engine.
///
/// Every field has a default so a partial JSON file only needs to name the
/// values it overrides.
///
/// # Invariants
/// - All weights and the repetition penalty are strictly positive
/// - All probabilities are within `[0.0, 1.0]`
/// - `suggestion_count` is at least 1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictorConfig {
	/// Multiplier applied to trigram candidates.
	#[serde(default = "default_trigram_weight")]
	pub trigram_weight: f64,

	/// Multiplier applied to bigram candidates.
	#[serde(default = "default_bigram_weight")]
	pub bigram_weight: f64,

	/// Multiplier applied to unigram (and dictionary) candidates.
	#[serde(default = "default_unigram_weight")]
	pub unigram_weight: f64,

	/// Minimum corpus count for a word to be proposed as a unigram candidate.
	#[serde(default = "default_min_unigram_count")]
	pub min_unigram_count: usize,

	/// Factor applied to the grammatical score when the candidate already
	/// appears in the context.
	#[serde(default = "default_repetition_penalty")]
	pub repetition_penalty: f64,

	/// Number of predictions returned by `predict_next` and by a session.
	#[serde(default = "default_suggestion_count")]
	pub suggestion_count: usize,

	/// Probability of typing the intended key.
	#[serde(default = "default_self_probability")]
	pub self_probability: f64,

	/// Emission probability used for a key pair absent from the emission matrix.
	#[serde(default = "default_fallback_probability")]
	pub fallback_probability: f64,

	/// Minimum positional match probability for a dictionary word to be kept.
	#[serde(default = "default_match_threshold")]
	pub match_threshold: f64,

	/// Whether the total word count accumulates over several training calls.
	/// When false, each call overwrites it with its own token count.
	#[serde(default)]
	pub accumulate_total_words: bool,
}

fn default_trigram_weight() -> f64 {
	1.5
}

fn default_bigram_weight() -> f64 {
	1.0
}

fn default_unigram_weight() -> f64 {
	0.5
}

fn default_min_unigram_count() -> usize {
	2
}

fn default_repetition_penalty() -> f64 {
	0.8
}

fn default_suggestion_count() -> usize {
	3
}

fn default_self_probability() -> f64 {
	0.8
}

fn default_fallback_probability() -> f64 {
	0.01
}

fn default_match_threshold() -> f64 {
	0.01
}

impl Default for PredictorConfig {
	fn default() -> Self {
		Self {
			trigram_weight: default_trigram_weight(),
			bigram_weight: default_bigram_weight(),
			unigram_weight: default_unigram_weight(),
			min_unigram_count: default_min_unigram_count(),
			repetition_penalty: default_repetition_penalty(),
			suggestion_count: default_suggestion_count(),
			self_probability: default_self_probability(),
			fallback_probability: default_fallback_probability(),
			match_threshold: default_match_threshold(),
			accumulate_total_words: false,
		}
	}
}

impl PredictorConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Loads a configuration from a JSON file and validates it.
	///
	/// # Errors
	/// Returns an error if the file cannot be read, is not valid JSON,
	/// or holds out-of-range values.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let content = fs::read_to_string(path)?;
		Self::from_json(&content)
	}

	/// Parses and validates a configuration from a JSON string.
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Sets the three model-order weights (trigram, bigram, unigram).
	pub fn with_weights(mut self, trigram: f64, bigram: f64, unigram: f64) -> Self {
		self.trigram_weight = trigram;
		self.bigram_weight = bigram;
		self.unigram_weight = unigram;
		self
	}

	/// Sets the number of returned suggestions.
	pub fn with_suggestion_count(mut self, count: usize) -> Self {
		self.suggestion_count = count;
		self
	}

	/// Sets the self-probability of the emission model.
	pub fn with_self_probability(mut self, probability: f64) -> Self {
		self.self_probability = probability;
		self
	}

	/// Enables or disables accumulation of the total word count.
	pub fn with_accumulated_total(mut self, accumulate: bool) -> Self {
		self.accumulate_total_words = accumulate;
		self
	}

	/// Checks every value against its domain.
	///
	/// # Errors
	/// Returns [`ClavierError::InvalidConfig`] naming the first offending field.
	pub fn validate(&self) -> Result<()> {
		let weights = [
			("trigram_weight", self.trigram_weight),
			("bigram_weight", self.bigram_weight),
			("unigram_weight", self.unigram_weight),
			("repetition_penalty", self.repetition_penalty),
		];
		for (name, value) in weights {
			if !(value > 0.0) || !value.is_finite() {
				return Err(ClavierError::invalid_config(format!("{name} must be > 0, got {value}")));
			}
		}

		let probabilities = [
			("self_probability", self.self_probability),
			("fallback_probability", self.fallback_probability),
			("match_threshold", self.match_threshold),
		];
		for (name, value) in probabilities {
			if !(0.0..=1.0).contains(&value) {
				return Err(ClavierError::invalid_config(format!(
					"{name} must be between 0.0 and 1.0, got {value}"
				)));
			}
		}

		if self.suggestion_count == 0 {
			return Err(ClavierError::invalid_config("suggestion_count must be >= 1"));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use float_cmp::approx_eq;

	#[test]
	fn test_default_config() {
		let config = PredictorConfig::default();
		assert!(approx_eq!(f64, config.trigram_weight, 1.5));
		assert!(approx_eq!(f64, config.bigram_weight, 1.0));
		assert!(approx_eq!(f64, config.unigram_weight, 0.5));
		assert_eq!(config.min_unigram_count, 2);
		assert_eq!(config.suggestion_count, 3);
		assert!(!config.accumulate_total_words);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_partial_json_uses_defaults() {
		let config = PredictorConfig::from_json(r#"{"suggestion_count": 5}"#).unwrap();
		assert_eq!(config.suggestion_count, 5);
		assert!(approx_eq!(f64, config.self_probability, 0.8));
	}

	#[test]
	fn test_invalid_values_rejected() {
		let config = PredictorConfig::new().with_self_probability(1.5);
		assert!(matches!(config.validate(), Err(ClavierError::InvalidConfig(_))));

		let config = PredictorConfig::new().with_weights(1.5, 0.0, 0.5);
		assert!(config.validate().is_err());

		assert!(PredictorConfig::from_json(r#"{"suggestion_count": 0}"#).is_err());
	}

	#[test]
	fn test_malformed_json() {
		assert!(matches!(PredictorConfig::from_json("{not json"), Err(ClavierError::Json(_))));
	}
}
