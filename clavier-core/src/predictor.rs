use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;

use crate::config::PredictorConfig;
use crate::corpus::is_incomplete;
use crate::error::{ClavierError, Result};
use crate::model::dictionary::FrequencyDictionary;
use crate::model::language_model::{LanguageModel, ModelBuilder};
use crate::model::matcher::{WordMatch, WordMatcher};
use crate::model::scorer::{Prediction, Scorer};

/// Outcome of a sentence-level prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
	/// The sentence already ends with terminal punctuation.
	Complete,
	/// Predictions were computed.
	Success,
}

/// Result of [`Predictor::predict_next`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionOutcome {
	pub status: PredictionStatus,
	/// The query, trimmed.
	pub original_sentence: String,
	/// Every word but the last.
	pub context: String,
	pub last_word: String,
	pub predictions: Vec<Prediction>,
}

/// Splits a sentence into its context (all words but the last) and its last word.
pub fn extract_context(text: &str) -> (String, String) {
	let mut words: Vec<&str> = text.split_whitespace().collect();
	let last = words.pop().unwrap_or_default().to_owned();
	(words.join(" "), last)
}

/// A trained, immutable predictor.
///
/// Holds the frozen [`LanguageModel`], the frequency dictionary and the
/// configuration. Every method is a pure function of this state, so one
/// `Predictor` can be shared (behind an `Arc`) by any number of sessions.
#[derive(Debug, Clone)]
pub struct Predictor {
	config: PredictorConfig,
	model: LanguageModel,
	dictionary: FrequencyDictionary,
	matcher: WordMatcher,
}

impl Predictor {
	/// Assembles a predictor from a trained model.
	pub fn new(model: LanguageModel, dictionary: FrequencyDictionary, config: PredictorConfig) -> Self {
		let matcher = WordMatcher::new(
			model.emission().clone(),
			dictionary.clone(),
			config.fallback_probability,
			config.match_threshold,
		);
		Self { config, model, dictionary, matcher }
	}

	pub fn config(&self) -> &PredictorConfig {
		&self.config
	}

	pub fn model(&self) -> &LanguageModel {
		&self.model
	}

	pub fn dictionary(&self) -> &FrequencyDictionary {
		&self.dictionary
	}

	/// The scorer over this predictor's tables.
	pub fn scorer(&self) -> Scorer<'_> {
		Scorer::new(self.model.ngrams(), &self.dictionary, &self.config)
	}

	/// Predicts the `k` most likely words after `current_word` in `context`.
	pub fn predict(&self, current_word: &str, context: &str, k: usize) -> Vec<Prediction> {
		self.scorer().predict(current_word, context, k)
	}

	/// Predicts the words likely to follow `text`.
	///
	/// The last word of `text` is the current word, the others its context.
	pub fn predict_after(&self, text: &str, k: usize) -> Vec<Prediction> {
		let (context, last_word) = extract_context(text);
		self.predict(&last_word, &context, k)
	}

	/// Completes an incomplete sentence.
	///
	/// # Behavior
	/// - A sentence ending with `.`, `!` or `?` is complete: no prediction.
	/// - Otherwise the configured number of predictions (3 by default) is
	///   computed for the last word in the context of the others.
	pub fn predict_next(&self, sentence: &str) -> PredictionOutcome {
		let original_sentence = sentence.trim().to_owned();

		if !is_incomplete(&original_sentence) {
			debug!("'{original_sentence}' is complete");
			return PredictionOutcome {
				status: PredictionStatus::Complete,
				original_sentence,
				context: String::new(),
				last_word: String::new(),
				predictions: Vec::new(),
			};
		}

		let (context, last_word) = extract_context(&original_sentence);
		let predictions = self.predict(&last_word, &context, self.config.suggestion_count);
		PredictionOutcome {
			status: PredictionStatus::Success,
			original_sentence,
			context,
			last_word,
			predictions,
		}
	}

	/// Dictionary words that the typed token may stand for, best first.
	pub fn match_word(&self, typed: &str) -> Vec<WordMatch> {
		self.matcher.match_candidates(typed)
	}
}

/// Entry point: trains on raw text and answers sentence completions.
///
/// Training may happen several times; each call extends what was learned and
/// publishes a fresh [`Predictor`]. Queries before the first training fail
/// with [`ClavierError::UninitializedModel`].
#[derive(Debug, Clone)]
pub struct TextPredictor {
	config: PredictorConfig,
	dictionary: FrequencyDictionary,
	builder: ModelBuilder,
	predictor: Option<Arc<Predictor>>,
}

impl TextPredictor {
	/// Creates an untrained predictor.
	///
	/// # Errors
	/// Returns [`ClavierError::InvalidConfig`] if the configuration is invalid.
	pub fn new(config: PredictorConfig) -> Result<Self> {
		config.validate()?;
		let builder = ModelBuilder::new()
			.with_self_probability(config.self_probability)
			.with_accumulated_total(config.accumulate_total_words);
		Ok(Self {
			config,
			dictionary: FrequencyDictionary::french(),
			builder,
			predictor: None,
		})
	}

	/// Replaces the frequency dictionary used for matching and fallback.
	pub fn with_dictionary(mut self, dictionary: FrequencyDictionary) -> Self {
		self.dictionary = dictionary;
		self
	}

	/// Learns `text` and publishes the updated predictor.
	pub fn train(&mut self, text: &str) -> &mut Self {
		self.builder.learn(text);
		let model = self.builder.build();
		info!(
			"predictor trained: {} distinct words",
			model.ngrams().vocabulary_size()
		);
		self.predictor = Some(Arc::new(Predictor::new(model, self.dictionary.clone(), self.config.clone())));
		self
	}

	/// Returns true once [`TextPredictor::train`] was called.
	pub fn is_trained(&self) -> bool {
		self.predictor.is_some()
	}

	/// The current trained predictor.
	///
	/// # Errors
	/// Returns [`ClavierError::UninitializedModel`] before training.
	pub fn predictor(&self) -> Result<Arc<Predictor>> {
		self.predictor.clone().ok_or(ClavierError::UninitializedModel)
	}

	/// Completes an incomplete sentence, see [`Predictor::predict_next`].
	///
	/// # Errors
	/// Returns [`ClavierError::UninitializedModel`] before training.
	pub fn predict_next(&self, sentence: &str) -> Result<PredictionOutcome> {
		let predictor = self.predictor.as_ref().ok_or(ClavierError::UninitializedModel)?;
		Ok(predictor.predict_next(sentence))
	}

	pub fn config(&self) -> &PredictorConfig {
		&self.config
	}
}

impl Default for TextPredictor {
	fn default() -> Self {
		Self {
			config: PredictorConfig::default(),
			dictionary: FrequencyDictionary::french(),
			builder: ModelBuilder::new(),
			predictor: None,
		}
	}
}
