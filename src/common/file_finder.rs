use crate::error::{AnalysisError, Result};
use std::fs::read_dir;
use std::path::{Path, PathBuf};

/// Collects the files directly inside `directory_path` whose extension is exactly
/// `extension`, sorted by path.
///
/// Matches what a shell `*.csv` pattern selects: the comparison is case-sensitive,
/// hidden files (leading `.`) are skipped and symbolic links to files are followed.
/// Subdirectories are not searched.
///
/// # Errors
///
/// [`AnalysisError::MissingFile`] if the directory does not exist,
/// [`AnalysisError::Io`] if it cannot be listed.
pub fn find_files_with_extension<P>(directory_path: P, extension: &str) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
{
    let directory_path = directory_path.as_ref();
    if !directory_path.exists() {
        return Err(AnalysisError::MissingFile {
            path: directory_path.to_path_buf(),
        });
    }

    let io_error = |source| AnalysisError::Io {
        path: directory_path.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in read_dir(directory_path).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        // `Path::is_file` follows symlinks, unlike `DirEntry::file_type`
        if path.extension().is_some_and(|found| found == extension) && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Derives the path of a chart rendered from `input_path`.
///
/// The input's extension is replaced by `suffix` and the result is placed in the
/// same directory, e.g. `a/b.csv` with `_histogram.png` becomes `a/b_histogram.png`.
pub fn output_path_for(input_path: &Path, suffix: &str) -> PathBuf {
    let mut file_name = input_path.file_stem().unwrap_or_default().to_os_string();
    file_name.push(suffix);
    input_path.with_file_name(file_name)
}
