use std::collections::BTreeMap;

use log::debug;

use super::state::State;
use crate::tokenizer::tokenize;

/// Separator joining the two history words of a trigram key.
pub const PAIR_SEPARATOR: char = ' ';

/// Builds the trigram key of the history `(first, second)`.
pub fn pair_key(first: &str, second: &str) -> String {
	let mut key = String::with_capacity(first.len() + second.len() + 1);
	key.push_str(first);
	key.push(PAIR_SEPARATOR);
	key.push_str(second);
	key
}

/// Word-level unigram, bigram and trigram counts.
///
/// The tables only ever grow: learning appends counts and nothing is
/// decremented.
///
/// # Responsibilities
/// - Tokenize training text and accumulate the three count tables
/// - Keep the total word count used to turn unigram counts into probabilities
/// - Answer read-only lookups for the prediction scorer and the generator
///
/// # Invariants
/// - Every bigram state key is a single word
/// - Every trigram state key is two words joined by [`PAIR_SEPARATOR`]
/// - Each unigram count is strictly positive
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NGramModel {
	/// Word => number of occurrences
	unigrams: BTreeMap<String, usize>,
	/// Word => successors
	bigrams: BTreeMap<String, State>,
	/// "word1 word2" => successors
	trigrams: BTreeMap<String, State>,
	/// Number of tokens used to normalize unigram counts
	total_words: usize,
}

impl NGramModel {
	/// Creates an empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Learns the three count tables from raw text.
	///
	/// # Parameters
	/// - `text`: raw training text, tokenized with [`tokenize`].
	/// - `accumulate_total`: when false, the total word count is overwritten
	///   with the token count of this call; when true it is added to it.
	///
	/// # Notes
	/// - Empty input leaves the tables unchanged.
	pub fn learn(&mut self, text: &str, accumulate_total: bool) {
		let words: Vec<String> = tokenize(text).collect();

		if accumulate_total {
			self.total_words += words.len();
		} else {
			self.total_words = words.len();
		}

		for word in &words {
			*self.unigrams.entry(word.clone()).or_insert(0) += 1;
		}

		for pair in words.windows(2) {
			self.bigrams
				.entry(pair[0].clone())
				.or_insert_with(|| State::new(&pair[0]))
				.add_transition(&pair[1]);
		}

		for triple in words.windows(3) {
			let key = pair_key(&triple[0], &triple[1]);
			self.trigrams
				.entry(key.clone())
				.or_insert_with(|| State::new(&key))
				.add_transition(&triple[2]);
		}

		debug!(
			"learned {} tokens: {} unigrams, {} bigram states, {} trigram states",
			words.len(),
			self.unigrams.len(),
			self.bigrams.len(),
			self.trigrams.len()
		);
	}

	/// Number of occurrences of `word`.
	pub fn unigram_count(&self, word: &str) -> usize {
		self.unigrams.get(word).copied().unwrap_or(0)
	}

	/// Iterates over the vocabulary with its counts.
	pub fn unigrams(&self) -> impl Iterator<Item = (&str, usize)> {
		self.unigrams.iter().map(|(word, count)| (word.as_str(), *count))
	}

	/// Successors of `word`, if it was ever followed by another word.
	pub fn bigram(&self, word: &str) -> Option<&State> {
		self.bigrams.get(word)
	}

	/// Successors of the history `key` ("word1 word2").
	pub fn trigram(&self, key: &str) -> Option<&State> {
		self.trigrams.get(key)
	}

	/// Token count used to normalize unigram probabilities.
	pub fn total_words(&self) -> usize {
		self.total_words
	}

	/// Number of distinct words.
	pub fn vocabulary_size(&self) -> usize {
		self.unigrams.len()
	}

	/// Returns true if nothing was learned.
	pub fn is_empty(&self) -> bool {
		self.unigrams.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_learn_counts() {
		let mut model = NGramModel::new();
		model.learn("Je voudrais aller au cinéma. Je voudrais aller au restaurant.", false);

		assert_eq!(model.total_words(), 10);
		assert_eq!(model.unigram_count("je"), 2);
		assert_eq!(model.unigram_count("cinéma"), 1);
		assert_eq!(model.unigram_count("absent"), 0);

		let after_au = model.bigram("au").unwrap();
		assert_eq!(after_au.count("cinéma"), 1);
		assert_eq!(after_au.count("restaurant"), 1);
		assert_eq!(after_au.total(), 2);

		let after_aller_au = model.trigram("aller au").unwrap();
		assert_eq!(after_aller_au.len(), 2);

		// Sentence boundaries are not modelled
		assert_eq!(model.bigram("cinéma").unwrap().count("je"), 1);
	}

	#[test]
	fn test_empty_input() {
		let mut model = NGramModel::new();
		model.learn("   ", false);
		assert!(model.is_empty());
		assert_eq!(model.total_words(), 0);
		assert!(model.bigram("").is_none());
	}

	#[test]
	fn test_total_overwritten_by_default() {
		let mut model = NGramModel::new();
		model.learn("un deux trois", false);
		model.learn("quatre cinq", false);
		assert_eq!(model.total_words(), 2);
		assert_eq!(model.vocabulary_size(), 5);

		let mut model = NGramModel::new();
		model.learn("un deux trois", true);
		model.learn("quatre cinq", true);
		assert_eq!(model.total_words(), 5);
	}

	#[test]
	fn test_counts_never_decrease() {
		let mut model = NGramModel::new();
		model.learn("le chat dort", false);
		let before = model.unigram_count("chat");
		model.learn("le chien dort", false);
		assert!(model.unigram_count("chat") >= before);
		assert_eq!(model.bigram("le").unwrap().total(), 2);
	}

	#[test]
	fn test_pair_key() {
		assert_eq!(pair_key("aller", "au"), "aller au");
	}
}
