use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads a corpus text file and returns its lines.
///
/// Invalid UTF-8 is replaced rather than rejected, corpora scraped from
/// older archives are rarely clean.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let bytes = fs::read(filename)?;
	Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_owned).collect())
}

/// Path of the cache file sitting next to a corpus file.
///
/// Example:
/// `data/paradise.txt` + `"bin"` → `data/paradise.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(input_path: P, output_extension: &str) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Corpus path has no filename"))?;

	let mut output = parent.join(file_stem);
	output.set_extension(output_extension);
	Ok(output)
}

/// Corpus name derived from its path (`./data/paradise.txt` → `paradise`).
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Corpus path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}
