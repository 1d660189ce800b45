use std::path::Path;
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use serde::Deserialize;

use crate::error::ModelError;
use crate::io;

/// Extension of lyric corpus files.
pub const CORPUS_EXTENSION: &str = "json";

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]+").expect("valid pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// Normalizes raw text into a corpus the tokenizer accepts.
///
/// Drops every character that is not an ASCII letter, digit or
/// whitespace, collapses whitespace runs into single spaces, trims and
/// lowercases. The output only holds `[a-z0-9 ]`, with no leading or
/// trailing space.
pub fn preprocess_corpus(raw: &str) -> String {
	let kept = NON_ALPHANUMERIC.replace_all(raw, "");
	let spaced = WHITESPACE.replace_all(&kept, " ");
	spaced.trim().to_lowercase()
}

/// Normalizes seed text and splits it into words.
pub fn split_seed(text: &str) -> Vec<String> {
	preprocess_corpus(text).split(' ').filter(|word| !word.is_empty()).map(str::to_owned).collect()
}

#[derive(Deserialize)]
struct Album {
	#[serde(rename = "Songs", default)]
	songs: Vec<Song>,
}

#[derive(Deserialize)]
struct Song {
	#[serde(rename = "Lyrics", default)]
	lyrics: Vec<Lyric>,
}

#[derive(Deserialize)]
struct Lyric {
	#[serde(rename = "Text")]
	text: String,
}

/// Concatenates every lyric line of a JSON document, in document order.
///
/// The document is an array of albums, each holding `Songs`, each holding
/// `Lyrics` lines with a `Text` field. Other fields are ignored. Each line
/// is preceded by a single space.
///
/// # Errors
/// Returns `ModelError::Json` if the document does not have that shape.
pub fn parse_lyrics(json: &str) -> Result<String, ModelError> {
	let albums: Vec<Album> = serde_json::from_str(json)?;

	let mut corpus = String::new();
	let mut lines = 0;
	for lyric in albums.iter().flat_map(|album| &album.songs).flat_map(|song| &song.lyrics) {
		corpus.push(' ');
		corpus.push_str(&lyric.text);
		lines += 1;
	}
	debug!("parsed {} albums, {lines} lyric lines", albums.len());

	Ok(corpus)
}

/// Reads a lyric JSON file and returns its raw (not normalized) text.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_lyrics<P: AsRef<Path>>(path: P) -> Result<String, ModelError> {
	let path = path.as_ref();
	let json = std::fs::read_to_string(path)?;
	let corpus = parse_lyrics(&json)?;
	info!("loaded {} bytes of lyrics from {}", corpus.len(), path.display());
	Ok(corpus)
}

/// Lists the corpus names (file stems of `*.json` files) of a directory.
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn list_corpora<P: AsRef<Path>>(dir: P) -> Result<Vec<String>, ModelError> {
	let mut names = Vec::new();
	for file in io::list_files(dir, CORPUS_EXTENSION)? {
		names.push(io::get_filename(&file)?);
	}
	Ok(names)
}

/// Name of a corpus file, without directory nor extension.
pub fn corpus_name<P: AsRef<Path>>(path: P) -> Result<String, ModelError> {
	Ok(io::get_filename(path)?)
}
