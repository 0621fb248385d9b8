use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a whole UTF-8 corpus file into memory.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}

/// Reads and concatenates several corpus files, separated by a newline.
pub fn read_corpora<P: AsRef<Path>>(filenames: &[P]) -> io::Result<String> {
	let mut contents = String::new();
	for filename in filenames {
		contents.push_str(&read_corpus(filename)?);
		contents.push('\n');
	}
	Ok(contents)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/french.txt"` → `"french"`
/// - `"french.txt"` → `"french"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_get_filename() {
		assert_eq!(get_filename("./data/french.txt").unwrap(), "french");
		assert_eq!(get_filename("french").unwrap(), "french");
		assert!(get_filename("").is_err());
	}

	#[test]
	fn test_normalize_folder() {
		assert_eq!(normalize_folder("data"), PathBuf::from("data"));
		assert!(normalize_folder(".").is_absolute());
	}

	#[test]
	fn test_list_and_read() {
		let dir = env::temp_dir().join(format!("clavier-io-{}", std::process::id()));
		fs::create_dir_all(&dir).unwrap();
		fs::write(dir.join("b.txt"), "deux").unwrap();
		fs::write(dir.join("a.txt"), "un").unwrap();
		fs::write(dir.join("notes.md"), "ignored").unwrap();

		assert_eq!(list_files(&dir, "txt").unwrap(), vec!["a.txt", "b.txt"]);
		let text = read_corpora(&[dir.join("a.txt"), dir.join("b.txt")]).unwrap();
		assert_eq!(text, "un\ndeux\n");
		assert!(read_corpus(dir.join("missing.txt")).is_err());

		fs::remove_dir_all(&dir).unwrap();
	}
}
