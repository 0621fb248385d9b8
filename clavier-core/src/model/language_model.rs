use log::{debug, warn};

use super::char_model::{CharModel, CharModelBuilder};
use super::emission::EmissionMatrix;
use super::ngram_model::NGramModel;
use crate::keyboard::Adjacency;

/// Everything learned from a training corpus, frozen.
///
/// A `LanguageModel` is only produced by [`ModelBuilder::build`] and never
/// changes afterwards, so it can be shared by any number of sessions.
///
/// - `ngrams`: word unigram, bigram and trigram counts
/// - `chars`: character transition probabilities
/// - `emission`: keystroke error model of the keyboard layout
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageModel {
	ngrams: NGramModel,
	chars: CharModel,
	emission: EmissionMatrix,
}

impl LanguageModel {
	pub fn ngrams(&self) -> &NGramModel {
		&self.ngrams
	}

	pub fn chars(&self) -> &CharModel {
		&self.chars
	}

	pub fn emission(&self) -> &EmissionMatrix {
		&self.emission
	}
}

/// Accumulates training text and freezes it into a [`LanguageModel`].
///
/// # Behavior
/// - [`ModelBuilder::learn`] feeds both the word and the character models.
/// - [`ModelBuilder::build`] can be called any number of times; each call
///   returns an independent snapshot of what was learned so far.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
	adjacency: Adjacency,
	self_probability: f64,
	accumulate_total_words: bool,
	ngrams: NGramModel,
	chars: CharModelBuilder,
}

impl ModelBuilder {
	/// Creates a builder for the AZERTY layout with default probabilities.
	pub fn new() -> Self {
		Self {
			adjacency: Adjacency::azerty(),
			self_probability: 0.8,
			accumulate_total_words: false,
			ngrams: NGramModel::new(),
			chars: CharModelBuilder::new(),
		}
	}

	/// Uses another key layout for the emission model.
	pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
		self.adjacency = adjacency;
		self
	}

	/// Sets the probability of typing the intended key.
	pub fn with_self_probability(mut self, probability: f64) -> Self {
		self.self_probability = probability;
		self
	}

	/// Whether the total word count accumulates across `learn` calls.
	pub fn with_accumulated_total(mut self, accumulate: bool) -> Self {
		self.accumulate_total_words = accumulate;
		self
	}

	/// Learns word n-grams from `text`.
	pub fn learn_words(&mut self, text: &str) -> &mut Self {
		self.ngrams.learn(text, self.accumulate_total_words);
		self
	}

	/// Learns character transitions from `text`.
	pub fn learn_characters(&mut self, text: &str) -> &mut Self {
		self.chars.learn(text);
		self
	}

	/// Learns both the word and the character models from `text`.
	pub fn learn(&mut self, text: &str) -> &mut Self {
		if text.trim().is_empty() {
			warn!("training text is empty, no word was learned");
		}
		self.learn_words(text).learn_characters(text)
	}

	/// Freezes the current counts into a model.
	pub fn build(&self) -> LanguageModel {
		let model = LanguageModel {
			ngrams: self.ngrams.clone(),
			chars: self.chars.build(),
			emission: EmissionMatrix::build(&self.adjacency, self.self_probability),
		};
		debug!(
			"built language model: {} words in vocabulary, {} total",
			model.ngrams.vocabulary_size(),
			model.ngrams.total_words()
		);
		model
	}
}

impl Default for ModelBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_snapshots_are_independent() {
		let mut builder = ModelBuilder::new();
		builder.learn("le chat dort");
		let first = builder.build();

		builder.learn("le chien dort");
		let second = builder.build();

		assert_eq!(first.ngrams().unigram_count("chien"), 0);
		assert_eq!(second.ngrams().unigram_count("chien"), 1);
		assert_eq!(second.ngrams().bigram("le").unwrap().total(), 2);
	}

	#[test]
	fn test_builds_all_models() {
		let mut builder = ModelBuilder::new();
		builder.learn("Bonjour le monde");
		let model = builder.build();
		assert!(!model.ngrams().is_empty());
		assert!(!model.chars().is_empty());
		assert!(model.emission().probability('a', 'a').is_some());
	}

	#[test]
	fn test_accumulated_total() {
		let mut builder = ModelBuilder::new().with_accumulated_total(true);
		builder.learn("un deux").learn("trois");
		assert_eq!(builder.build().ngrams().total_words(), 3);
	}
}
