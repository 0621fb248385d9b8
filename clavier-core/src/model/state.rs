use std::collections::BTreeMap;

use rand::Rng;

/// Successor counts observed after one n-gram history.
///
/// A `State` is a node of the word-level Markov chain: `key` is the history
/// (a word, or two words joined by a space) and `transitions` count every
/// word observed right after it.
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition count is strictly positive
/// - Iteration is ordered by successor word, independent of insertion order
#[derive(Clone, Debug, PartialEq)]
pub struct State {
	/// History this state was observed after.
	key: String,
	/// Successor word => number of observations.
	transitions: BTreeMap<String, usize>,
	/// Sum of all transition counts.
	total: usize,
}

impl State {
	/// Creates a new empty state for the given history.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: BTreeMap::new(),
			total: 0,
		}
	}

	/// The history of this state.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Records one occurrence of `next_word` after this history.
	pub fn add_transition(&mut self, next_word: &str) {
		*self.transitions.entry(next_word.to_owned()).or_insert(0) += 1;
		self.total += 1;
	}

	/// Number of times `next_word` followed this history.
	pub fn count(&self, next_word: &str) -> usize {
		self.transitions.get(next_word).copied().unwrap_or(0)
	}

	/// Sum of all successor counts.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of distinct successors.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Iterates over `(successor, count)` pairs.
	pub fn transitions(&self) -> impl Iterator<Item = (&str, usize)> {
		self.transitions.iter().map(|(word, count)| (word.as_str(), *count))
	}

	/// Iterates over `(successor, count / total)` pairs.
	pub fn probabilities(&self) -> impl Iterator<Item = (&str, f64)> {
		let total = self.total as f64;
		self.transitions.iter().map(move |(word, count)| (word.as_str(), *count as f64 / total))
	}

	/// Draws a successor with probability proportional to its count.
	///
	/// Returns `None` if the state has no transitions.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..self.total);
		for (word, count) in &self.transitions {
			if r < *count {
				return Some(word);
			}
			r -= count;
		}

		// Unreachable while `total` matches the counts
		self.transitions.keys().next_back().map(String::as_str)
	}
}
