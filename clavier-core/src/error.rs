//! Error type shared by every public operation of the crate.

use std::io;

use thiserror::Error;

/// Errors raised by the prediction engine.
///
/// "No match" is not an error: an unknown context or an unknown typed token
/// degrades to the unigram and dictionary fallbacks instead.
#[derive(Error, Debug)]
pub enum ClavierError {
	/// A prediction was requested before any training text was learned.
	#[error("the predictor must be trained before it can be queried")]
	UninitializedModel,

	/// `select_suggestion` was called with an index outside the current list.
	#[error("suggestion index {index} is out of range ({len} suggestions available)")]
	SuggestionOutOfRange { index: usize, len: usize },

	/// A configuration value is outside its domain.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// Corpus or configuration file could not be read.
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	/// Configuration file is not valid JSON.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl ClavierError {
	/// Creates an [`ClavierError::InvalidConfig`] error.
	pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
		ClavierError::InvalidConfig(msg.into())
	}
}

/// Result type alias for operations that may fail with [`ClavierError`].
pub type Result<T> = std::result::Result<T, ClavierError>;
