//! Built-in training text and sentence helpers used to feed the predictor.

use rand::Rng;

/// Small French corpus used when no training file is given.
pub const SAMPLE_CORPUS: &str = "
Le français est une langue romane parlée en France.
Je voudrais aller au cinéma demain soir pour voir un film.
Je voudrais aller au restaurant ce weekend avec mes amis.
Je voudrais aller à la plage cet été pour me détendre.
La ville de Paris est la capitale de la France.
Le président de la République française habite au palais de l'Élysée.
Les étudiants travaillent dur pour réussir leurs examens.
Le chat noir dort sur le canapé du salon.
Mon frère aime jouer au football dans le parc.
La boulangerie vend du pain frais tous les matins.
Je prends le métro tous les jours pour aller travailler.
Il fait beau aujourd'hui, nous pouvons sortir nous promener.
Le professeur explique la leçon aux élèves attentifs.
J'ai acheté un nouveau livre que je vais lire ce weekend.
Nous devons protéger l'environnement pour les générations futures.
Le musée du Louvre attire des millions de visiteurs chaque année.
Ma sœur étudie la médecine à l'université.
Les enfants jouent dans le jardin pendant que leurs parents discutent.
Je vais faire les courses au supermarché cet après-midi.
Le train pour Lyon part dans une heure de la gare.
";

fn is_terminal(c: char) -> bool {
	matches!(c, '.' | '!' | '?')
}

/// Returns true if `sentence` does not end with `.`, `!` or `?`.
pub fn is_incomplete(sentence: &str) -> bool {
	!sentence.trim_end().ends_with(is_terminal)
}

/// Finds the trailing fragments of `text` that are not finished sentences.
///
/// The text is flattened to single spaces and cut after every terminal
/// punctuation mark; segments of at least two words that do not end with
/// terminal punctuation are returned.
pub fn find_incomplete_sentences(text: &str) -> Vec<String> {
	let mut segments: Vec<String> = Vec::new();
	let mut current: Vec<&str> = Vec::new();

	for word in text.split_whitespace() {
		current.push(word);
		if word.ends_with(is_terminal) {
			segments.push(current.join(" "));
			current.clear();
		}
	}
	if !current.is_empty() {
		segments.push(current.join(" "));
	}

	segments
		.into_iter()
		.filter(|segment| segment.split_whitespace().count() >= 2 && is_incomplete(segment))
		.collect()
}

/// Extracts every finished sentence of `text`, trimmed.
///
/// A sentence is a run of non-terminal characters closed by one terminal
/// punctuation mark. Text after the last mark is ignored.
pub fn find_complete_sentences(text: &str) -> Vec<String> {
	let mut sentences = Vec::new();
	let mut current = String::new();

	for c in text.chars() {
		if is_terminal(c) {
			if !current.is_empty() {
				current.push(c);
				sentences.push(current.trim().to_owned());
				current.clear();
			}
		} else {
			current.push(c);
		}
	}
	sentences
}

/// Cuts finished sentences into incomplete ones.
///
/// Each sentence keeps `max(2, floor(len * (0.6 + u * 0.3)))` of its words,
/// `u` uniform in `[0, 1)`, loses its trailing terminal punctuation, and is
/// kept only if longer than five characters. At most `count` results.
pub fn create_incomplete_sentences<R: Rng + ?Sized>(sentences: &[String], count: usize, rng: &mut R) -> Vec<String> {
	sentences
		.iter()
		.map(|sentence| {
			let words: Vec<&str> = sentence.split_whitespace().collect();
			let ratio = 0.6 + rng.random::<f64>() * 0.3;
			let keep = ((words.len() as f64 * ratio).floor() as usize).max(2).min(words.len());
			let truncated = words[..keep].join(" ");
			truncated.strip_suffix(is_terminal).unwrap_or(&truncated).trim().to_owned()
		})
		.filter(|sentence| sentence.chars().count() > 5)
		.take(count)
		.collect()
}
