use std::sync::Arc;

use log::trace;
use serde::Serialize;

use crate::error::{ClavierError, Result};
use crate::predictor::Predictor;

/// A discrete key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
	/// Any character key other than the space bar.
	Char(char),
	Space,
	Backspace,
}

impl KeyEvent {
	/// Parses a key name: `"backspace"`, `" "` or a single character.
	pub fn from_key(key: &str) -> Option<Self> {
		if key.eq_ignore_ascii_case("backspace") {
			return Some(KeyEvent::Backspace);
		}
		let mut chars = key.chars();
		match (chars.next(), chars.next()) {
			(Some(c), None) => Some(KeyEvent::from(c)),
			_ => None,
		}
	}
}

impl From<char> for KeyEvent {
	fn from(c: char) -> Self {
		if c == ' ' { KeyEvent::Space } else { KeyEvent::Char(c) }
	}
}

/// Visible state of a session after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
	/// Finalized words, each followed by a space.
	pub committed: String,
	/// Word being typed.
	pub current_word: String,
	pub suggestions: Vec<String>,
}

/// Sentence-completion state machine over one typed text.
///
/// While a word is being typed, suggestions are dictionary words the typed
/// letters may stand for (keyboard typos included). After a space they are
/// the predicted next words.
///
/// A session is owned by one caller; share the [`Predictor`] instead of the
/// session when serving several users.
#[derive(Debug, Clone)]
pub struct Session {
	predictor: Arc<Predictor>,
	committed: String,
	current_word: String,
	suggestions: Vec<String>,
}

impl Session {
	/// Starts an empty session.
	pub fn new(predictor: Arc<Predictor>) -> Self {
		Self {
			predictor,
			committed: String::new(),
			current_word: String::new(),
			suggestions: Vec::new(),
		}
	}

	fn count(&self) -> usize {
		self.predictor.config().suggestion_count
	}

	fn predict_words(&self, text: &str) -> Vec<String> {
		self.predictor
			.predict_after(text, self.count())
			.into_iter()
			.map(|prediction| prediction.word)
			.collect()
	}

	/// Applies one key event.
	///
	/// # Behavior
	/// - `Space`: commits the current word and predicts the next one.
	/// - `Backspace`: removes the last character of the current word; on an
	///   empty word, removes the last committed space and brings the last
	///   committed word back into edition. Suggestions are left unchanged.
	/// - `Char`: appends the lowercased character and matches the word
	///   against the dictionary.
	pub fn key_press(&mut self, key: KeyEvent) -> SessionSnapshot {
		match key {
			KeyEvent::Space => {
				self.committed.push_str(&self.current_word);
				self.committed.push(' ');
				self.current_word.clear();
				self.suggestions = self.predict_words(&self.committed);
			}
			KeyEvent::Backspace => {
				if self.current_word.pop().is_none() && self.committed.pop().is_some() && !self.committed.ends_with(' ') {
					let start = self.committed.rfind(' ').map_or(0, |i| i + 1);
					self.current_word = self.committed.split_off(start);
				}
			}
			KeyEvent::Char(c) => {
				self.current_word.extend(c.to_lowercase());
				self.suggestions = self
					.predictor
					.match_word(&self.current_word)
					.into_iter()
					.take(self.count())
					.map(|candidate| candidate.word)
					.collect();
			}
		}

		trace!("{key:?} -> '{}|{}' {:?}", self.committed, self.current_word, self.suggestions);
		self.snapshot()
	}

	/// Replaces the current word by the suggestion at `index` and predicts
	/// the words that may follow it.
	///
	/// # Errors
	/// Returns [`ClavierError::SuggestionOutOfRange`] without touching the
	/// session if `index` is not a valid suggestion.
	pub fn select_suggestion(&mut self, index: usize) -> Result<SessionSnapshot> {
		let chosen = self.suggestions.get(index).cloned().ok_or(ClavierError::SuggestionOutOfRange {
			index,
			len: self.suggestions.len(),
		})?;

		self.current_word = chosen;
		let text = format!("{}{}", self.committed, self.current_word);
		self.suggestions = self.predict_words(&text);
		Ok(self.snapshot())
	}

	/// Feeds every character of `text` as a key event.
	pub fn type_text(&mut self, text: &str) -> Vec<SessionSnapshot> {
		text.chars().map(|c| self.key_press(KeyEvent::from(c))).collect()
	}

	/// Committed text followed by the current word.
	pub fn full_text(&self) -> String {
		format!("{}{}", self.committed, self.current_word)
	}

	pub fn committed(&self) -> &str {
		&self.committed
	}

	pub fn current_word(&self) -> &str {
		&self.current_word
	}

	pub fn suggestions(&self) -> &[String] {
		&self.suggestions
	}

	/// Current visible state.
	pub fn snapshot(&self) -> SessionSnapshot {
		SessionSnapshot {
			committed: self.committed.clone(),
			current_word: self.current_word.clone(),
			suggestions: self.suggestions.clone(),
		}
	}

	/// Clears the text and the suggestions.
	pub fn reset(&mut self) {
		self.committed.clear();
		self.current_word.clear();
		self.suggestions.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::corpus::SAMPLE_CORPUS;
	use crate::predictor::TextPredictor;

	fn session() -> Session {
		let mut predictor = TextPredictor::default();
		predictor.train(SAMPLE_CORPUS);
		Session::new(predictor.predictor().unwrap())
	}

	#[test]
	fn test_initial_state() {
		let session = session();
		assert_eq!(session.full_text(), "");
		assert!(session.suggestions().is_empty());
	}

	#[test]
	fn test_typing_matches_dictionary() {
		let mut session = session();
		session.key_press(KeyEvent::Char('L'));
		let snapshot = session.key_press(KeyEvent::Char('e'));
		assert_eq!(snapshot.current_word, "le");
		assert_eq!(snapshot.committed, "");
		assert!(snapshot.suggestions.len() <= 3);
		assert_eq!(snapshot.suggestions[0], "le");
	}

	#[test]
	fn test_space_commits_and_predicts() {
		let mut session = session();
		session.type_text("je voudrais aller au");
		let snapshot = session.key_press(KeyEvent::Space);
		assert_eq!(snapshot.committed, "je voudrais aller au ");
		assert_eq!(snapshot.current_word, "");
		assert_eq!(snapshot.suggestions.len(), 3);
		assert!(snapshot.suggestions.iter().any(|w| w == "cinéma" || w == "restaurant"));
	}

	#[test]
	fn test_backspace() {
		let mut session = session();
		session.type_text("le chat ");
		assert_eq!(session.committed(), "le chat ");

		// Empty current word: the last committed word comes back
		let snapshot = session.key_press(KeyEvent::Backspace);
		assert_eq!(snapshot.committed, "le ");
		assert_eq!(snapshot.current_word, "chat");

		let snapshot = session.key_press(KeyEvent::Backspace);
		assert_eq!(snapshot.current_word, "cha");

		for _ in 0..3 {
			session.key_press(KeyEvent::Backspace);
		}
		assert_eq!(session.full_text(), "le ");

		session.key_press(KeyEvent::Backspace);
		assert_eq!(session.committed(), "");
		assert_eq!(session.current_word(), "le");

		for _ in 0..5 {
			session.key_press(KeyEvent::Backspace);
		}
		assert_eq!(session.full_text(), "");
	}

	#[test]
	fn test_select_suggestion() {
		let mut session = session();
		session.type_text("je voudrais aller ");
		session.type_text("lz");
		let chosen = session.suggestions()[0].clone();

		let snapshot = session.select_suggestion(0).unwrap();
		assert_eq!(snapshot.current_word, chosen);
		assert_eq!(snapshot.committed, "je voudrais aller ");
		assert!(!snapshot.suggestions.is_empty());
	}

	#[test]
	fn test_select_out_of_range_is_atomic() {
		let mut session = session();
		session.type_text("le");
		let before = session.snapshot();
		let err = session.select_suggestion(10).unwrap_err();
		assert!(matches!(err, ClavierError::SuggestionOutOfRange { index: 10, .. }));
		assert_eq!(session.snapshot(), before);
	}

	#[test]
	fn test_reset() {
		let mut session = session();
		session.type_text("le chat");
		session.reset();
		assert_eq!(session.snapshot(), SessionSnapshot {
			committed: String::new(),
			current_word: String::new(),
			suggestions: Vec::new(),
		});
	}

	#[test]
	fn test_key_parsing() {
		assert_eq!(KeyEvent::from_key("backspace"), Some(KeyEvent::Backspace));
		assert_eq!(KeyEvent::from_key(" "), Some(KeyEvent::Space));
		assert_eq!(KeyEvent::from_key("é"), Some(KeyEvent::Char('é')));
		assert_eq!(KeyEvent::from_key("ab"), None);
		assert_eq!(KeyEvent::from_key(""), None);
	}
}
