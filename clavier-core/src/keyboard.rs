//! Physical key adjacency of the French AZERTY layout.

/// Keys of the AZERTY layout with their physically adjacent keys.
///
/// Letters, the punctuation keys of the bottom rows and the space bar. The
/// space bar is only adjacent to itself.
const AZERTY: &[(char, &[char])] = &[
	('a', &['z', 'q', 's']),
	('z', &['a', 'e', 'q', 's', 'd']),
	('e', &['z', 'r', 's', 'd', 'f']),
	('r', &['e', 't', 'd', 'f', 'g']),
	('t', &['r', 'y', 'f', 'g', 'h']),
	('y', &['t', 'u', 'g', 'h', 'j']),
	('u', &['y', '!', 'i', 'h', 'j', 'k']),
	('i', &['u', '!', 'o', 'j', 'k', 'l']),
	('o', &['i', 'p', 'k', 'l', 'm']),
	('p', &['o', 'l', 'm']),
	('q', &['a', 'z', 's', 'w']),
	('s', &['q', 'a', 'z', 'e', 'd', 'w', 'x']),
	('d', &['s', 'z', 'e', 'r', 'f', 'x', 'c']),
	('f', &['d', 'e', 'r', 't', 'g', 'c', 'v']),
	('g', &['f', 'r', 't', 'y', 'h', 'v', 'b']),
	('h', &['g', 't', 'y', 'u', 'j', 'b', 'n']),
	('j', &['h', 'y', 'u', 'i', 'k', 'n', ',']),
	('k', &['j', 'u', 'i', 'o', 'l', ',', ';']),
	('l', &['k', 'i', 'o', 'p', 'm', ';', ':']),
	('m', &['l', 'o', 'p', ':', '=']),
	('w', &['q', 's', 'x']),
	('x', &['w', 's', 'd', 'c']),
	('c', &['x', 'd', 'f', 'v']),
	('v', &['c', 'f', 'g', 'b']),
	('b', &['v', 'g', 'h', 'n']),
	('n', &['b', 'h', 'j', ',']),
	(',', &['n', 'j', 'k', ';']),
	(';', &[',', 'k', 'l', ':']),
	(':', &[';', 'l', 'm', '=']),
	('!', &['u', 'i']),
	(' ', &[' ']),
];

/// Read-only view over a key adjacency table.
///
/// Iteration follows the declaration order of the table, and neighbors keep
/// their declared order.
#[derive(Debug, Clone, Copy)]
pub struct Adjacency {
	table: &'static [(char, &'static [char])],
}

impl Adjacency {
	/// The AZERTY layout.
	pub fn azerty() -> Self {
		Self { table: AZERTY }
	}

	/// Builds an adjacency view over a custom static table.
	pub fn from_table(table: &'static [(char, &'static [char])]) -> Self {
		Self { table }
	}

	/// Neighbors of `key`, or `None` if the key is not on the layout.
	pub fn neighbors(&self, key: char) -> Option<&'static [char]> {
		self.table.iter().find(|(k, _)| *k == key).map(|(_, n)| *n)
	}

	/// Returns true if `key` is on the layout.
	pub fn contains(&self, key: char) -> bool {
		self.neighbors(key).is_some()
	}

	/// Iterates over `(key, neighbors)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (char, &'static [char])> + '_ {
		self.table.iter().copied()
	}

	/// Number of keys on the layout.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}
}

impl Default for Adjacency {
	fn default() -> Self {
		Self::azerty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_every_letter_present() {
		let keyboard = Adjacency::azerty();
		for c in 'a'..='z' {
			assert!(keyboard.contains(c), "missing key {c}");
		}
		assert!(keyboard.contains(' '));
		assert!(!keyboard.contains('é'));
	}

	#[test]
	fn test_neighbors_order() {
		let keyboard = Adjacency::azerty();
		assert_eq!(keyboard.neighbors('a'), Some(&['z', 'q', 's'][..]));
		assert_eq!(keyboard.neighbors(' '), Some(&[' '][..]));
		assert_eq!(keyboard.neighbors('0'), None);
	}

	#[test]
	fn test_letter_adjacency_is_symmetric() {
		let keyboard = Adjacency::azerty();
		for (key, neighbors) in keyboard.iter().filter(|(k, _)| k.is_ascii_lowercase()) {
			for n in neighbors.iter().filter(|n| n.is_ascii_lowercase()) {
				let back = keyboard.neighbors(*n).unwrap_or(&[]);
				assert!(back.contains(&key), "{key} -> {n} has no way back");
			}
		}
	}
}
