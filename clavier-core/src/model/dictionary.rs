use std::collections::BTreeMap;

/// Relative frequencies of common French words.
const FRENCH: &[(&str, f64)] = &[
	("de", 0.071), ("la", 0.055), ("le", 0.047), ("et", 0.041), ("les", 0.039),
	("des", 0.037), ("en", 0.036), ("un", 0.035), ("du", 0.033), ("une", 0.032),
	("à", 0.031), ("que", 0.030), ("est", 0.027), ("pour", 0.025), ("dans", 0.024),
	("qui", 0.023), ("ce", 0.022), ("il", 0.021), ("au", 0.020), ("pas", 0.019),
	("sur", 0.018), ("se", 0.017), ("plus", 0.016), ("par", 0.016), ("on", 0.015),
	("ne", 0.015), ("sont", 0.014), ("je", 0.014), ("vous", 0.013), ("avec", 0.013),
	("son", 0.012), ("elle", 0.012), ("nous", 0.011), ("mais", 0.011), ("comme", 0.010),
	("ou", 0.010), ("si", 0.010), ("leur", 0.009), ("y", 0.009), ("ont", 0.009),
	("être", 0.009), ("faire", 0.008), ("tout", 0.008), ("cette", 0.008), ("aussi", 0.008),
	("bien", 0.007), ("peut", 0.007), ("ces", 0.007), ("sans", 0.007), ("même", 0.007),
	("avoir", 0.006), ("aux", 0.006), ("deux", 0.006), ("très", 0.006), ("été", 0.006),
	("fait", 0.006), ("votre", 0.005), ("dont", 0.005), ("alors", 0.005), ("dire", 0.005),
	("nos", 0.005), ("fois", 0.005), ("tous", 0.005), ("peu", 0.004), ("autre", 0.004),
	("car", 0.004), ("entre", 0.004), ("temps", 0.004), ("ça", 0.004), ("moi", 0.004),
	("après", 0.004), ("faut", 0.003), ("ainsi", 0.003), ("voir", 0.003), ("sa", 0.003),
	("bon", 0.003), ("mon", 0.003), ("lui", 0.003), ("donc", 0.003), ("me", 0.003),
	("quand", 0.003), ("encore", 0.003), ("toujours", 0.003), ("monde", 0.003), ("aller", 0.003),
	("là", 0.003), ("moins", 0.003), ("jour", 0.003), ("donner", 0.003), ("où", 0.003),
	("années", 0.002), ("venir", 0.002), ("sous", 0.002), ("prendre", 0.002), ("mettre", 0.002),
	("grand", 0.002), ("contre", 0.002), ("depuis", 0.002), ("non", 0.002), ("notre", 0.002),
	("vie", 0.002), ("rien", 0.002), ("avant", 0.002), ("dernier", 0.002), ("premier", 0.002),
	("jamais", 0.002), ("suite", 0.002), ("quelques", 0.002), ("lors", 0.002), ("chaque", 0.002),
	("nouveau", 0.002), ("moment", 0.002), ("merci", 0.002), ("an", 0.002), ("rue", 0.002),
	("toute", 0.002), ("partie", 0.001), ("personne", 0.001), ("travail", 0.001), ("quatre", 0.001),
];

/// Prior probability of words, independent of any training corpus.
///
/// Used as the candidate list of typo-tolerant matching and as the last
/// resort of next-word prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyDictionary {
	words: BTreeMap<String, f64>,
}

impl FrequencyDictionary {
	/// The built-in French dictionary.
	pub fn french() -> Self {
		Self::from_entries(FRENCH.iter().copied())
	}

	/// Builds a dictionary from `(word, frequency)` pairs.
	///
	/// A repeated word keeps its last frequency.
	pub fn from_entries<'a, I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, f64)>,
	{
		let words = entries.into_iter().map(|(word, frequency)| (word.to_owned(), frequency)).collect();
		Self { words }
	}

	/// Frequency of `word`, if present.
	pub fn frequency(&self, word: &str) -> Option<f64> {
		self.words.get(word).copied()
	}

	/// Iterates over `(word, frequency)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.words.iter().map(|(word, frequency)| (word.as_str(), *frequency))
	}

	/// Words with exactly `len` characters.
	pub fn with_length(&self, len: usize) -> impl Iterator<Item = (&str, f64)> {
		self.iter().filter(move |(word, _)| word.chars().count() == len)
	}

	/// The `n` most frequent words, most frequent first.
	pub fn most_frequent(&self, n: usize) -> Vec<(&str, f64)> {
		let mut entries: Vec<(&str, f64)> = self.iter().collect();
		entries.sort_by(|a, b| b.1.total_cmp(&a.1));
		entries.truncate(n);
		entries
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

impl Default for FrequencyDictionary {
	fn default() -> Self {
		Self::french()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_french() {
		let dictionary = FrequencyDictionary::french();
		assert_eq!(dictionary.len(), FRENCH.len());
		assert_eq!(dictionary.frequency("de"), Some(0.071));
		assert_eq!(dictionary.frequency("zut"), None);
	}

	#[test]
	fn test_most_frequent() {
		let dictionary = FrequencyDictionary::french();
		let top: Vec<&str> = dictionary.most_frequent(3).into_iter().map(|(w, _)| w).collect();
		assert_eq!(top, vec!["de", "la", "le"]);
	}

	#[test]
	fn test_with_length_counts_characters() {
		let dictionary = FrequencyDictionary::from_entries([("été", 0.1), ("ete", 0.1), ("à", 0.1)]);
		assert_eq!(dictionary.with_length(3).count(), 2);
		assert_eq!(dictionary.with_length(1).count(), 1);
	}
}
