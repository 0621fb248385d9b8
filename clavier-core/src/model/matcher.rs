use log::trace;
use serde::Serialize;

use super::dictionary::FrequencyDictionary;
use super::emission::EmissionMatrix;

/// A dictionary word that could have been meant by a typed token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordMatch {
	pub word: String,
	/// Positional match probability times the word's prior frequency.
	pub score: f64,
}

/// Typo-tolerant lookup of typed tokens in a frequency dictionary.
///
/// Keystroke errors are assumed independent across positions: the score of a
/// candidate is the product of per-position emission probabilities, with no
/// alignment for inserted or missing characters. Only words of the same
/// length as the typed token are considered.
#[derive(Debug, Clone)]
pub struct WordMatcher {
	emission: EmissionMatrix,
	dictionary: FrequencyDictionary,
	/// Emission probability of a pair absent from the matrix.
	fallback_probability: f64,
	/// Minimum positional probability for a candidate to be kept.
	threshold: f64,
}

impl WordMatcher {
	pub fn new(
		emission: EmissionMatrix,
		dictionary: FrequencyDictionary,
		fallback_probability: f64,
		threshold: f64,
	) -> Self {
		Self { emission, dictionary, fallback_probability, threshold }
	}

	/// Probability of typing `typed` while meaning `candidate`.
	///
	/// Returns 0.0 when the lengths differ.
	pub fn match_probability(&self, typed: &str, candidate: &str) -> f64 {
		if typed.chars().count() != candidate.chars().count() {
			return 0.0;
		}

		typed
			.chars()
			.zip(candidate.chars())
			.map(|(typed, intended)| {
				self.emission
					.probability(intended, typed)
					.unwrap_or(self.fallback_probability)
			})
			.product()
	}

	/// Ranks the dictionary words that `typed` may stand for.
	///
	/// Candidates whose positional probability does not exceed the threshold
	/// are dropped; the rest are sorted by descending final score.
	pub fn match_candidates(&self, typed: &str) -> Vec<WordMatch> {
		let len = typed.chars().count();
		if len == 0 {
			return Vec::new();
		}

		let mut matches: Vec<WordMatch> = self
			.dictionary
			.with_length(len)
			.filter_map(|(word, frequency)| {
				let probability = self.match_probability(typed, word);
				(probability > self.threshold).then(|| WordMatch {
					word: word.to_owned(),
					score: probability * frequency,
				})
			})
			.collect();

		matches.sort_by(|a, b| b.score.total_cmp(&a.score));
		trace!("'{typed}' matches {} dictionary words", matches.len());
		matches
	}

	/// The emission matrix used for matching.
	pub fn emission(&self) -> &EmissionMatrix {
		&self.emission
	}

	/// The dictionary candidates are drawn from.
	pub fn dictionary(&self) -> &FrequencyDictionary {
		&self.dictionary
	}
}

impl Default for WordMatcher {
	fn default() -> Self {
		Self::new(EmissionMatrix::default(), FrequencyDictionary::french(), 0.01, 0.01)
	}
}
