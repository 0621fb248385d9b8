use std::collections::HashMap;

use log::{trace, warn};
use serde::Serialize;

use super::dictionary::FrequencyDictionary;
use super::grammar::transition_score;
use super::ngram_model::{NGramModel, pair_key};
use super::state::State;
use crate::config::PredictorConfig;
use crate::tokenizer::tokenize;

/// Model a candidate was proposed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NGramSource {
	Trigram,
	Bigram,
	Unigram,
	/// Frequency dictionary, used when the corpus proposes nothing.
	Dictionary,
}

impl NGramSource {
	pub fn as_str(&self) -> &'static str {
		match self {
			NGramSource::Trigram => "trigram",
			NGramSource::Bigram => "bigram",
			NGramSource::Unigram => "unigram",
			NGramSource::Dictionary => "dictionary",
		}
	}
}

impl std::fmt::Display for NGramSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A scored next-word proposal, recomputed on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
	pub word: String,
	pub source: NGramSource,
	/// Probability under the proposing model.
	pub probability: f64,
	/// Grammatical multiplier of the transition.
	pub grammar_score: f64,
	/// `probability * grammar_score * model weight`, the ranking key.
	pub score: f64,
}

/// A ranked prediction as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
	pub word: String,
	/// Percentage with two decimals, e.g. `"50.00%"`.
	pub probability: String,
	pub model: NGramSource,
	/// The caller's words followed by the predicted word.
	pub full_suggestion: String,
	pub score: f64,
}

/// Formats a probability as a percentage with two decimals.
pub fn format_percentage(probability: f64) -> String {
	format!("{:.2}%", probability * 100.0)
}

/// Ranks next-word candidates from the n-gram counts.
///
/// # Algorithm
/// 1. trigram successors of the last two words (only with a non-empty context)
/// 2. bigram successors of the current word
/// 3. every vocabulary word seen at least `min_unigram_count` times
/// 4. merge by word, keeping the best score (the first one on ties)
/// 5. sort by descending score
///
/// Each order is weighted by the configuration (1.5 / 1.0 / 0.5 by default)
/// and multiplied by the grammatical transition score. When all three orders
/// are silent the dictionary's most frequent words are proposed instead.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
	model: &'a NGramModel,
	dictionary: &'a FrequencyDictionary,
	config: &'a PredictorConfig,
}

impl<'a> Scorer<'a> {
	pub fn new(model: &'a NGramModel, dictionary: &'a FrequencyDictionary, config: &'a PredictorConfig) -> Self {
		Self { model, dictionary, config }
	}

	/// Scores the successors of one n-gram state.
	fn state_candidates(
		&self,
		state: &State,
		source: NGramSource,
		weight: f64,
		current: &str,
		context: &[String],
	) -> impl Iterator<Item = Candidate> {
		let penalty = self.config.repetition_penalty;
		state.probabilities().map(move |(word, probability)| {
			let grammar_score = transition_score(word, current, context, penalty);
			Candidate {
				word: word.to_owned(),
				source,
				probability,
				grammar_score,
				score: probability * grammar_score * weight,
			}
		})
	}

	/// All merged candidates for `current` after the `context` words, best first.
	///
	/// Both arguments are expected to be normalized tokens.
	pub fn candidates(&self, current: &str, context: &[String]) -> Vec<Candidate> {
		let penalty = self.config.repetition_penalty;
		let mut proposals: Vec<Candidate> = Vec::new();

		if let Some(previous) = context.last() {
			if let Some(state) = self.model.trigram(&pair_key(previous, current)) {
				proposals.extend(self.state_candidates(
					state,
					NGramSource::Trigram,
					self.config.trigram_weight,
					current,
					context,
				));
			}
		}

		if let Some(state) = self.model.bigram(current) {
			proposals.extend(self.state_candidates(
				state,
				NGramSource::Bigram,
				self.config.bigram_weight,
				current,
				context,
			));
		}

		let total = self.model.total_words();
		if total > 0 {
			let weight = self.config.unigram_weight;
			proposals.extend(
				self.model
					.unigrams()
					.filter(|(_, count)| *count >= self.config.min_unigram_count)
					.map(|(word, count)| {
						let probability = count as f64 / total as f64;
						let grammar_score = transition_score(word, current, context, penalty);
						Candidate {
							word: word.to_owned(),
							source: NGramSource::Unigram,
							probability,
							grammar_score,
							score: probability * grammar_score * weight,
						}
					}),
			);
		}

		if proposals.is_empty() {
			warn!("no n-gram candidate after '{current}', falling back to the dictionary");
			let weight = self.config.unigram_weight;
			proposals.extend(self.dictionary.most_frequent(self.dictionary.len()).into_iter().map(
				|(word, frequency)| {
					let grammar_score = transition_score(word, current, context, penalty);
					Candidate {
						word: word.to_owned(),
						source: NGramSource::Dictionary,
						probability: frequency,
						grammar_score,
						score: frequency * grammar_score * weight,
					}
				},
			));
		}

		let mut merged = merge(proposals);
		// Stable: equal scores keep their first-encountered order
		merged.sort_by(|a, b| b.score.total_cmp(&a.score));
		merged
	}

	/// Predicts the `k` most likely words after `current_word`.
	///
	/// # Parameters
	/// - `current_word`: the last word typed
	/// - `context`: the words before it, space separated (may be empty)
	/// - `k`: maximum number of predictions
	///
	/// # Notes
	/// - Lookups use the tokenized, lowercased form of both arguments.
	/// - `full_suggestion` keeps the caller's spelling.
	pub fn predict(&self, current_word: &str, context: &str, k: usize) -> Vec<Prediction> {
		let mut words: Vec<String> = tokenize(context).chain(tokenize(current_word)).collect();
		let current = words.pop().unwrap_or_default();
		let context_words = words;

		let typed = context
			.split_whitespace()
			.chain(current_word.split_whitespace())
			.collect::<Vec<_>>()
			.join(" ");

		let predictions: Vec<Prediction> = self
			.candidates(&current, &context_words)
			.into_iter()
			.take(k)
			.map(|candidate| Prediction {
				full_suggestion: format!("{typed} {}", candidate.word).trim_start().to_owned(),
				probability: format_percentage(candidate.probability),
				model: candidate.source,
				word: candidate.word,
				score: candidate.score,
			})
			.collect();

		trace!("predictions after '{typed}': {predictions:?}");
		predictions
	}
}

/// Keeps one candidate per word: the highest score, the first one on ties.
///
/// Output order is the order in which words were first proposed.
fn merge(proposals: Vec<Candidate>) -> Vec<Candidate> {
	let mut index: HashMap<String, usize> = HashMap::new();
	let mut merged: Vec<Candidate> = Vec::with_capacity(proposals.len());

	for candidate in proposals {
		match index.get(&candidate.word) {
			Some(&i) => {
				if merged[i].score < candidate.score {
					merged[i] = candidate;
				}
			}
			None => {
				index.insert(candidate.word.clone(), merged.len());
				merged.push(candidate);
			}
		}
	}
	merged
}
