use std::collections::BTreeMap;

use rand::Rng;

use crate::keyboard::Adjacency;

/// Probability of each typed key given the intended key.
///
/// Built once from an [`Adjacency`] table: the intended key keeps
/// `self_probability`, the remainder is split evenly over its neighbors.
/// A key whose only neighbor is itself keeps the whole mass.
///
/// # Invariants
/// - Each row sums to 1.0 (within floating rounding)
/// - Immutable after construction
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionMatrix {
	rows: BTreeMap<char, BTreeMap<char, f64>>,
}

impl EmissionMatrix {
	/// Builds the emission matrix of `adjacency`.
	///
	/// # Parameters
	/// - `adjacency`: key layout
	/// - `self_probability`: probability of typing the intended key, in `[0, 1]`
	pub fn build(adjacency: &Adjacency, self_probability: f64) -> Self {
		let mut rows = BTreeMap::new();

		for (key, neighbors) in adjacency.iter() {
			let others: Vec<char> = neighbors.iter().copied().filter(|n| *n != key).collect();
			let mut row = BTreeMap::new();

			if others.is_empty() {
				row.insert(key, 1.0);
			} else {
				row.insert(key, self_probability);
				let error_probability = (1.0 - self_probability) / others.len() as f64;
				for neighbor in others {
					*row.entry(neighbor).or_insert(0.0) += error_probability;
				}
			}
			rows.insert(key, row);
		}

		Self { rows }
	}

	/// Probability of typing `typed` when `intended` was meant, if the pair is known.
	pub fn probability(&self, intended: char, typed: char) -> Option<f64> {
		self.rows.get(&intended)?.get(&typed).copied()
	}

	/// Emission row of `intended`.
	pub fn row(&self, intended: char) -> Option<&BTreeMap<char, f64>> {
		self.rows.get(&intended)
	}

	/// Iterates over the intended keys.
	pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
		self.rows.keys().copied()
	}

	/// Replays `text` as a hurried typist would type it.
	///
	/// Each character with an emission row is replaced by a character drawn
	/// from that row; other characters are copied unchanged.
	pub fn simulate_typing<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
		text.chars()
			.flat_map(char::to_lowercase)
			.map(|c| match self.rows.get(&c) {
				Some(row) => {
					let draw: f64 = rng.random();
					let mut cumulative = 0.0;
					for (typed, probability) in row {
						cumulative += probability;
						if draw <= cumulative {
							return *typed;
						}
					}
					c
				}
				None => c,
			})
			.collect()
	}
}

impl Default for EmissionMatrix {
	fn default() -> Self {
		Self::build(&Adjacency::azerty(), 0.8)
	}
}
