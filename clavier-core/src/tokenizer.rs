/// Punctuation replaced by a space before splitting.
const PUNCTUATION: &[char] = &[
	'.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~', '(', ')',
];

/// Returns true if `c` belongs to the punctuation class stripped by the tokenizer.
pub fn is_punctuation(c: char) -> bool {
	PUNCTUATION.contains(&c)
}

/// Lowercases `text` and replaces the punctuation class with spaces.
///
/// Whitespace runs are left in place; [`Tokens`] skips them while splitting.
pub fn normalize(text: &str) -> String {
	text.chars()
		.flat_map(char::to_lowercase)
		.map(|c| if is_punctuation(c) { ' ' } else { c })
		.collect()
}

/// Lazy sequence of lowercase word tokens.
///
/// Created by [`tokenize`]. Owns the normalized text and yields one token per
/// call to `next`, never an empty one.
#[derive(Debug, Clone)]
pub struct Tokens {
	normalized: String,
	position: usize,
}

impl Iterator for Tokens {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		let rest = &self.normalized[self.position..];
		let start = rest.find(|c: char| !c.is_whitespace())?;
		let word = &rest[start..];
		let len = word.find(char::is_whitespace).unwrap_or(word.len());
		self.position += start + len;
		Some(word[..len].to_owned())
	}
}

/// Splits raw text into lowercase word tokens.
///
/// # Notes
/// - Empty or whitespace-only input yields no token.
/// - Apostrophes are kept: "l'élysée" is a single token.
pub fn tokenize(text: &str) -> Tokens {
	Tokens { normalized: normalize(text), position: 0 }
}
