use rand::Rng;
use rand::seq::IndexedRandom;

use super::dictionary::FrequencyDictionary;
use super::ngram_model::NGramModel;

const START_WORDS: &[&str] = &["la", "le", "les", "un", "une", "je", "nous", "vous", "il", "elle"];

/// Terminal punctuation, drawn uniformly (hence weighted toward '.').
const END_PUNCTUATION: &[char] = &['.', '.', '.', '!', '?'];

/// Random sentence generator driven by bigram counts.
///
/// Used to produce demonstration input. All randomness comes from the `rng`
/// passed to each call, so a seeded generator gives reproducible text.
///
/// # Responsibilities
/// - Pick a start word and walk the bigram chain with weighted sampling
/// - Fall back to a random dictionary word when the chain has no successor
/// - Format the result as a sentence (capitalized, terminal punctuation)
#[derive(Debug, Clone)]
pub struct SentenceGenerator<'a> {
	model: &'a NGramModel,
	dictionary: &'a FrequencyDictionary,
	start_words: Vec<String>,
}

impl<'a> SentenceGenerator<'a> {
	pub fn new(model: &'a NGramModel, dictionary: &'a FrequencyDictionary) -> Self {
		Self {
			model,
			dictionary,
			start_words: START_WORDS.iter().map(|w| (*w).to_owned()).collect(),
		}
	}

	/// Draws the word following `previous`.
	///
	/// Bigram-weighted when `previous` has successors, otherwise a uniformly
	/// random dictionary word. Returns `None` only if both sources are empty.
	fn next_word<R: Rng + ?Sized>(&self, previous: &str, rng: &mut R) -> Option<String> {
		if let Some(word) = self.model.bigram(previous).and_then(|state| state.sample(rng)) {
			return Some(word.to_owned());
		}
		if self.dictionary.is_empty() {
			return None;
		}
		let index = rng.random_range(0..self.dictionary.len());
		self.dictionary.iter().nth(index).map(|(word, _)| word.to_owned())
	}

	/// Generates one sentence of `min_len..=max_len` words.
	///
	/// # Notes
	/// - The first letter is capitalized and a terminal punctuation mark is appended.
	/// - `max_len` lower than `min_len` is treated as `min_len`.
	pub fn generate_sentence<R: Rng + ?Sized>(&self, rng: &mut R, min_len: usize, max_len: usize) -> String {
		let max_len = max_len.max(min_len);
		let target = rng.random_range(min_len..=max_len).max(1);

		let mut words: Vec<String> = Vec::with_capacity(target);
		if let Some(start) = self.start_words.choose(rng) {
			words.push(start.clone());
		}

		while words.len() < target {
			let previous = words.last().map(String::as_str).unwrap_or_default();
			match self.next_word(previous, rng) {
				Some(word) => words.push(word),
				None => break,
			}
		}

		let mut sentence = capitalize(&words.join(" "));
		if let Some(punctuation) = END_PUNCTUATION.choose(rng) {
			sentence.push(*punctuation);
		}
		sentence
	}

	/// Generates `count` sentences of 5 to 15 words, space separated.
	pub fn generate_paragraph<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> String {
		(0..count)
			.map(|_| self.generate_sentence(rng, 5, 15))
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Walks the bigram chain from `seed` for at most `length` words.
	///
	/// Stops early when the current word was never followed by another one.
	pub fn generate_from<R: Rng + ?Sized>(&self, rng: &mut R, seed: &str, length: usize) -> String {
		let mut words = vec![seed.to_owned()];
		while words.len() < length {
			let current = &words[words.len() - 1];
			let next = match self.model.bigram(current).and_then(|state| state.sample(rng)) {
				Some(word) => word.to_owned(),
				None => break,
			};
			words.push(next);
		}
		words.join(" ")
	}
}

/// Uppercases the first character of `s`.
fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn model() -> NGramModel {
		let mut model = NGramModel::new();
		model.learn("la ville est belle et la ville est grande", false);
		model
	}

	#[test]
	fn test_sentence_shape() {
		let model = model();
		let dictionary = FrequencyDictionary::french();
		let generator = SentenceGenerator::new(&model, &dictionary);
		let mut rng = StdRng::seed_from_u64(3);

		for _ in 0..20 {
			let sentence = generator.generate_sentence(&mut rng, 5, 15);
			assert!(sentence.ends_with(['.', '!', '?']));
			assert!(sentence.chars().next().unwrap().is_uppercase());
			let words = sentence.split_whitespace().count();
			assert!((5..=15).contains(&words), "{sentence}");
		}
	}

	#[test]
	fn test_seeded_generation_is_reproducible() {
		let model = model();
		let dictionary = FrequencyDictionary::french();
		let generator = SentenceGenerator::new(&model, &dictionary);

		let a = generator.generate_paragraph(&mut StdRng::seed_from_u64(11), 3);
		let b = generator.generate_paragraph(&mut StdRng::seed_from_u64(11), 3);
		assert_eq!(a, b);
	}

	#[test]
	fn test_generate_from_follows_bigrams() {
		let model = model();
		let dictionary = FrequencyDictionary::french();
		let generator = SentenceGenerator::new(&model, &dictionary);
		let mut rng = StdRng::seed_from_u64(5);

		let text = generator.generate_from(&mut rng, "la", 10);
		let words: Vec<&str> = text.split(' ').collect();
		assert_eq!(words[0], "la");
		assert!(words.len() <= 10);
		for pair in words.windows(2) {
			assert!(model.bigram(pair[0]).unwrap().count(pair[1]) > 0);
		}

		// A word without successor stops the chain immediately
		assert_eq!(generator.generate_from(&mut rng, "grande", 10), "grande");
	}

	#[test]
	fn test_capitalize() {
		assert_eq!(capitalize("élève"), "Élève");
		assert_eq!(capitalize(""), "");
	}
}
