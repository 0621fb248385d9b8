//! Coarse part-of-speech heuristics for French.
//!
//! Words are classified by closed word lists first, then by an ordered list
//! of suffix rules. The resulting [`WordClass`] pair of a transition selects a
//! compatibility multiplier used to re-rank predictions.

use serde::Serialize;

/// Coarse word class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordClass {
	Article,
	Pronoun,
	Verb,
	VerbInfinitive,
	Preposition,
	Noun,
	ProperNoun,
	NounOrAdj,
	Unknown,
}

impl WordClass {
	/// Label of the class, e.g. `"verb-infinitive"`.
	pub fn as_str(&self) -> &'static str {
		match self {
			WordClass::Article => "article",
			WordClass::Pronoun => "pronoun",
			WordClass::Verb => "verb",
			WordClass::VerbInfinitive => "verb-infinitive",
			WordClass::Preposition => "preposition",
			WordClass::Noun => "noun",
			WordClass::ProperNoun => "proper-noun",
			WordClass::NounOrAdj => "noun-or-adj",
			WordClass::Unknown => "unknown",
		}
	}
}

impl std::fmt::Display for WordClass {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

const ARTICLES: &[&str] = &["le", "la", "les", "un", "une", "des", "du", "de", "au", "aux"];

const PRONOUNS: &[&str] = &[
	"je", "tu", "il", "elle", "nous", "vous", "ils", "elles", "on", "ce", "cette", "ces", "mon", "ma", "mes", "ton",
	"ta", "tes", "son", "sa", "ses", "notre", "votre", "leur", "leurs", "l'",
];

const VERBS: &[&str] = &[
	"est", "sont", "a", "ont", "fait", "va", "vont", "peut", "veut", "dit", "parle", "mange", "dort", "travaille",
	"étudie", "lit", "écrit", "aime", "joue", "prépare", "visite", "explique", "dessine", "ferme", "ouvre", "répare",
	"conduit", "enseigne", "apprend", "regarde", "écoute",
];

const VERB_INFINITIVES: &[&str] = &[
	"être", "avoir", "faire", "aller", "pouvoir", "vouloir", "dire", "parler", "manger", "dormir", "travailler",
	"étudier", "lire", "écrire", "aimer", "jouer", "préparer", "visiter", "expliquer", "dessiner", "fermer", "ouvrir",
	"réparer", "conduire", "enseigner", "apprendre", "regarder", "écouter",
];

const PREPOSITIONS: &[&str] = &[
	"à", "de", "dans", "par", "pour", "en", "vers", "avec", "sans", "sous", "sur", "chez", "entre", "derrière",
	"devant", "contre", "pendant", "après", "avant", "depuis", "jusqu'à",
];

/// Closed lists, in lookup priority order.
const WORD_LISTS: &[(&[&str], WordClass)] = &[
	(ARTICLES, WordClass::Article),
	(PRONOUNS, WordClass::Pronoun),
	(VERBS, WordClass::Verb),
	(VERB_INFINITIVES, WordClass::VerbInfinitive),
	(PREPOSITIONS, WordClass::Preposition),
];

/// A word as seen by the suffix rules.
struct Word<'a> {
	original: &'a str,
	lower: &'a str,
}

type Rule = (fn(&Word) -> bool, WordClass);

fn ends_with_vowel_then(lower: &str, tail: &str) -> bool {
	lower
		.strip_suffix(tail)
		.and_then(|head| head.chars().next_back())
		.is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

fn ends_with_any(lower: &str, suffixes: &[&str]) -> bool {
	suffixes.iter().any(|s| lower.ends_with(s))
}

/// Suffix rules, first match wins.
const SUFFIX_RULES: &[Rule] = &[
	(|w| ends_with_vowel_then(w.lower, "nt"), WordClass::Verb),
	(|w| ends_with_vowel_then(w.lower, "ns"), WordClass::Verb),
	(|w| w.lower.ends_with("ez"), WordClass::Verb),
	(|w| ends_with_any(w.lower, &["er", "ir", "re"]), WordClass::VerbInfinitive),
	(|w| ends_with_any(w.lower, &["eur", "euse", "teur", "trice"]), WordClass::Noun),
	(|w| ends_with_any(w.lower, &["tion", "sion", "ment"]), WordClass::Noun),
	(|w| w.original.chars().next().is_some_and(|c| c.is_ascii_uppercase()), WordClass::ProperNoun),
	(|w| ends_with_any(w.lower, &["e", "s", "x"]), WordClass::NounOrAdj),
];

/// Classifies a word.
///
/// Lookup order:
/// 1. closed lists (case-insensitive): article, pronoun, verb, infinitive, preposition
/// 2. suffix rules on the lowercased word; the proper-noun rule looks at the
///    original casing
/// 3. [`WordClass::Unknown`]
///
/// Total: every input, including the empty string, maps to exactly one class.
pub fn classify(word: &str) -> WordClass {
	if word.is_empty() {
		return WordClass::Unknown;
	}
	let lower = word.to_lowercase();

	if let Some((_, class)) = WORD_LISTS.iter().find(|(list, _)| list.contains(&lower.as_str())) {
		return *class;
	}

	let word = Word { original: word, lower: &lower };
	SUFFIX_RULES
		.iter()
		.find(|(predicate, _)| predicate(&word))
		.map(|(_, class)| *class)
		.unwrap_or(WordClass::Unknown)
}

/// Compatibility multiplier of the transition `last -> next`, 1.0 when no rule applies.
pub fn compatibility(last: WordClass, next: WordClass) -> f64 {
	use WordClass::*;

	match (last, next) {
		(Article, NounOrAdj | Noun) => 2.0,
		(Pronoun, Verb) => 2.0,
		(Verb, Article) => 1.5,
		(Verb, Preposition) => 1.5,
		(Preposition, Article | Noun | NounOrAdj) => 1.8,
		(Noun, Verb) => 1.3,
		(NounOrAdj, Preposition) => 1.4,
		(NounOrAdj, NounOrAdj) => 1.2,
		(VerbInfinitive, Article) => 1.5,
		_ => 1.0,
	}
}

/// Grammatical plausibility of `next_word` following `last_word`.
///
/// The compatibility of the two classes, multiplied by `repetition_penalty`
/// when `next_word` is already one of the `context` words.
pub fn transition_score(next_word: &str, last_word: &str, context: &[String], repetition_penalty: f64) -> f64 {
	let score = compatibility(classify(last_word), classify(next_word));
	if context.iter().any(|word| word == next_word) {
		score * repetition_penalty
	} else {
		score
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use float_cmp::approx_eq;
	use rstest::rstest;

	#[rstest]
	#[case("le", WordClass::Article)]
	#[case("De", WordClass::Article)]
	#[case("nous", WordClass::Pronoun)]
	#[case("l'", WordClass::Pronoun)]
	#[case("étudie", WordClass::Verb)]
	#[case("apprendre", WordClass::VerbInfinitive)]
	#[case("chez", WordClass::Preposition)]
	#[case("jusqu'à", WordClass::Preposition)]
	#[case("travaillent", WordClass::Verb)]
	#[case("pouvons", WordClass::Verb)]
	#[case("mangez", WordClass::Verb)]
	#[case("finir", WordClass::VerbInfinitive)]
	#[case("boulanger", WordClass::VerbInfinitive)]
	#[case("professeur", WordClass::Noun)]
	#[case("danseuse", WordClass::Noun)]
	#[case("actrice", WordClass::Noun)]
	#[case("république", WordClass::NounOrAdj)]
	#[case("génération", WordClass::Noun)]
	#[case("Paris", WordClass::ProperNoun)]
	#[case("paris", WordClass::NounOrAdj)]
	#[case("chevaux", WordClass::NounOrAdj)]
	#[case("chat", WordClass::Unknown)]
	#[case("", WordClass::Unknown)]
	fn test_classify(#[case] word: &str, #[case] expected: WordClass) {
		assert_eq!(classify(word), expected);
	}

	#[test]
	fn test_rule_priority() {
		// "ment" would be a noun, but the vowel + "nt" verb rule comes first
		assert_eq!(classify("moment"), WordClass::Verb);
		assert_eq!(classify("jouent"), WordClass::Verb);
		// An infinitive ending wins over the agent-noun ending
		assert_eq!(classify("lecteur"), WordClass::Noun);
		assert_eq!(classify("lire"), WordClass::VerbInfinitive);
		assert_eq!(classify("cadre"), WordClass::VerbInfinitive);
	}

	#[rstest]
	#[case("la", "ville", 2.0)]
	#[case("je", "mange", 2.0)]
	#[case("est", "la", 1.5)]
	#[case("dans", "le", 1.8)]
	#[case("chat", "noir", 1.0)]
	fn test_transition_score(#[case] last: &str, #[case] next: &str, #[case] expected: f64) {
		assert!(approx_eq!(f64, transition_score(next, last, &[], 0.8), expected));
	}

	#[test]
	fn test_repetition_penalty() {
		let context = vec!["la".to_owned(), "ville".to_owned()];
		assert!(approx_eq!(f64, transition_score("ville", "la", &context, 0.8), 1.6, epsilon = 1e-12));
		// Whole words only: "vil" is not in the context
		assert!(approx_eq!(f64, transition_score("vil", "la", &context, 0.8), 1.0));
	}
}
