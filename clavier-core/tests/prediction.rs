//! End-to-end behavior of training, prediction and typing sessions.

use std::collections::HashSet;

use clavier_core::corpus::SAMPLE_CORPUS;
use clavier_core::model::emission::EmissionMatrix;
use clavier_core::model::grammar::{WordClass, classify};
use clavier_core::model::scorer::NGramSource;
use clavier_core::{ClavierError, KeyEvent, PredictionStatus, PredictorConfig, Session, TextPredictor};
use float_cmp::approx_eq;
use rstest::*;

#[fixture]
fn trained() -> TextPredictor {
	let mut predictor = TextPredictor::new(PredictorConfig::default()).unwrap();
	predictor.train(SAMPLE_CORPUS);
	predictor
}

#[rstest]
fn test_completes_aller_au(trained: TextPredictor) {
	let outcome = trained.predict_next("Je voudrais aller au").unwrap();
	assert_eq!(outcome.status, PredictionStatus::Success);

	let words: Vec<&str> = outcome.predictions.iter().map(|p| p.word.as_str()).collect();
	assert!(words.contains(&"cinéma") || words.contains(&"restaurant"), "{words:?}");

	let first_unigram = outcome.predictions.iter().position(|p| p.model == NGramSource::Unigram);
	let first_trigram = outcome.predictions.iter().position(|p| p.model == NGramSource::Trigram);
	assert_eq!(first_trigram, Some(0));
	if let Some(unigram) = first_unigram {
		assert!(unigram > 0);
	}
}

#[rstest]
fn test_complete_sentence(trained: TextPredictor) {
	let outcome = trained.predict_next("La France est belle.").unwrap();
	assert_eq!(outcome.status, PredictionStatus::Complete);
	assert!(outcome.predictions.is_empty());
}

#[test]
fn test_untrained() {
	let predictor = TextPredictor::default();
	assert!(matches!(predictor.predict_next("Le chat"), Err(ClavierError::UninitializedModel)));
}

#[rstest]
#[case("Je voudrais aller au")]
#[case("Le chat noir dort sur le")]
#[case("Les enfants jouent dans")]
#[case("mot inconnu")]
#[case("")]
fn test_ranking_invariants(trained: TextPredictor, #[case] sentence: &str) {
	let predictor = trained.predictor().unwrap();
	let (context, last) = clavier_core::predictor::extract_context(sentence);

	for k in [1, 3, 10] {
		let predictions = predictor.predict(&last, &context, k);
		assert!(predictions.len() <= k);

		let words: HashSet<&str> = predictions.iter().map(|p| p.word.as_str()).collect();
		assert_eq!(words.len(), predictions.len(), "duplicate word in {predictions:?}");

		assert!(predictions.windows(2).all(|pair| pair[0].score >= pair[1].score));
	}
}

#[rstest]
fn test_prediction_is_idempotent(trained: TextPredictor) {
	let predictor = trained.predictor().unwrap();
	let first = predictor.predict("le", "Le chat noir dort sur", 5);
	let second = predictor.predict("le", "Le chat noir dort sur", 5);
	assert_eq!(first, second);
}

#[rstest]
fn test_emission_rows_sum_to_one(trained: TextPredictor) {
	let predictor = trained.predictor().unwrap();
	let emission: &EmissionMatrix = predictor.model().emission();
	for key in emission.keys() {
		let sum: f64 = emission.row(key).unwrap().values().sum();
		assert!(approx_eq!(f64, sum, 1.0, epsilon = 1e-9), "{key:?}: {sum}");
	}
}

#[rstest]
fn test_unseen_words_are_classified(trained: TextPredictor) {
	let predictor = trained.predictor().unwrap();
	for word in ["zorglub", "Xylophone", "anticonstitutionnellement", "42", "l'"] {
		assert_eq!(predictor.model().ngrams().unigram_count(word), 0);
		let class = classify(word);
		assert!(!class.as_str().is_empty());
	}
	assert_eq!(classify("Xylophone"), WordClass::ProperNoun);
}

#[rstest]
fn test_session_round_trip(trained: TextPredictor) {
	let mut session = Session::new(trained.predictor().unwrap());

	session.type_text("je voudrais aller au");
	let snapshot = session.key_press(KeyEvent::Space);
	assert!(snapshot.suggestions.len() <= 3);
	assert!(!snapshot.suggestions.is_empty());

	let chosen = snapshot.suggestions[0].clone();
	let snapshot = session.select_suggestion(0).unwrap();
	assert_eq!(snapshot.current_word, chosen);
	assert_eq!(session.full_text(), format!("je voudrais aller au {chosen}"));
}

#[rstest]
fn test_sessions_are_independent(trained: TextPredictor) {
	let predictor = trained.predictor().unwrap();
	let mut a = Session::new(predictor.clone());
	let mut b = Session::new(predictor);

	a.type_text("le chat ");
	b.type_text("la");
	assert_eq!(a.committed(), "le chat ");
	assert_eq!(b.committed(), "");
	assert_eq!(b.current_word(), "la");
}
