use std::path::Path;
use std::{fs, io};

/// Name of a corpus file: its last component, extension removed
/// (`"./data/folklore.json"` gives `"folklore"`).
pub(crate) fn get_filename<P: AsRef<Path>>(path: P) -> io::Result<String> {
	let path = path.as_ref();
	match path.file_stem() {
		Some(stem) => Ok(stem.to_string_lossy().into_owned()),
		None => Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("no file name in {}", path.display()),
		)),
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
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
