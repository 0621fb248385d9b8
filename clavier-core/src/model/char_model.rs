use std::collections::BTreeMap;

/// Accented letters kept by the character model on top of ASCII word characters.
const ACCENTED: &str = "àáâãäåçèéêëìíîïñòóôõöùúûüýÿ";

/// Returns true if `c` survives the character model's cleaning step.
fn is_kept(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || ACCENTED.contains(c)
}

/// Accumulates raw character transition counts.
///
/// Counts from several training calls add up; [`CharModelBuilder::build`]
/// normalizes them once.
#[derive(Clone, Debug, Default)]
pub struct CharModelBuilder {
	counts: BTreeMap<char, BTreeMap<char, usize>>,
}

impl CharModelBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts transitions between consecutive characters of the cleaned text.
	pub fn learn(&mut self, text: &str) {
		let clean: Vec<char> = text
			.chars()
			.flat_map(char::to_lowercase)
			.filter(|c| is_kept(*c))
			.collect();

		for pair in clean.windows(2) {
			*self.counts.entry(pair[0]).or_default().entry(pair[1]).or_insert(0) += 1;
		}
	}

	/// Normalizes the counts into per-character probabilities.
	pub fn build(&self) -> CharModel {
		let transitions = self
			.counts
			.iter()
			.map(|(from, successors)| {
				let total: usize = successors.values().sum();
				let row = successors
					.iter()
					.map(|(to, count)| (*to, *count as f64 / total as f64))
					.collect();
				(*from, row)
			})
			.collect();
		CharModel { transitions }
	}
}

/// Character-level transition probabilities.
///
/// Retained alongside the word models but not used to rank predictions.
///
/// # Invariants
/// - Each row sums to 1.0 (within floating rounding)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CharModel {
	transitions: BTreeMap<char, BTreeMap<char, f64>>,
}

impl CharModel {
	/// Probability that `to` follows `from`, 0.0 if never observed.
	pub fn probability(&self, from: char, to: char) -> f64 {
		self.transitions
			.get(&from)
			.and_then(|row| row.get(&to))
			.copied()
			.unwrap_or(0.0)
	}

	/// Successors of `from` with their probabilities.
	pub fn successors(&self, from: char) -> impl Iterator<Item = (char, f64)> + '_ {
		self.transitions
			.get(&from)
			.into_iter()
			.flat_map(|row| row.iter().map(|(c, p)| (*c, *p)))
	}

	/// Iterates over every source character.
	pub fn sources(&self) -> impl Iterator<Item = char> + '_ {
		self.transitions.keys().copied()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use float_cmp::approx_eq;

	#[test]
	fn test_rows_sum_to_one() {
		let mut builder = CharModelBuilder::new();
		builder.learn("Le château, près de l'église!");
		let model = builder.build();
		for from in model.sources() {
			let sum: f64 = model.successors(from).map(|(_, p)| p).sum();
			assert!(approx_eq!(f64, sum, 1.0, epsilon = 1e-9), "row {from:?} sums to {sum}");
		}
	}

	#[test]
	fn test_punctuation_is_dropped() {
		let mut builder = CharModelBuilder::new();
		builder.learn("a,b");
		let model = builder.build();
		// The comma is removed before counting, so 'a' is followed by 'b'
		assert!(approx_eq!(f64, model.probability('a', 'b'), 1.0));
		assert!(approx_eq!(f64, model.probability('a', ','), 0.0));
	}

	#[test]
	fn test_accumulates_before_normalizing() {
		let mut builder = CharModelBuilder::new();
		builder.learn("ab");
		builder.learn("ac");
		let model = builder.build();
		assert!(approx_eq!(f64, model.probability('a', 'b'), 0.5));
		assert!(approx_eq!(f64, model.probability('a', 'c'), 0.5));
	}

	#[test]
	fn test_empty() {
		let model = CharModelBuilder::new().build();
		assert!(model.is_empty());
		assert_eq!(model.successors('a').count(), 0);
	}
}
