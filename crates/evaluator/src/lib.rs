use colored::*;
use models::hdu::HduList;
use models::{VerifyError, VerifyOption};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validators::{verify_with, WarningSink};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid HDU document {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    Verify(#[from] VerifyError),
}

/// Outcome of verifying one document
#[derive(Debug)]
pub struct Evaluation {
    pub path: PathBuf,
    /// The document as left by the verification, fixes included
    pub document: HduList,
    pub outcome: Result<(), VerifyError>,
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub fn read_document(path: &Path) -> Result<HduList, EvaluationError> {
    let content = fs::read_to_string(path).map_err(|source| EvaluationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| EvaluationError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_document(path: &Path, document: &HduList) -> Result<(), EvaluationError> {
    let content = serde_yaml::to_string(document).map_err(|source| EvaluationError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, content).map_err(|source| EvaluationError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and verify one document.
///
/// An unrecognised option is an error before the file is touched; problems
/// found in the document end up in [`Evaluation::outcome`].
pub fn evaluate_file<S>(
    path: &Path,
    option: &str,
    sink: &mut S,
    verbose: bool,
) -> Result<Evaluation, EvaluationError>
where
    S: WarningSink + ?Sized,
{
    option.parse::<VerifyOption>()?;

    logging::info(&format!("Verifying {} with option '{}'", path.display(), option));

    let mut document = read_document(path)?;
    let outcome = verify_with(&mut document, option, sink);

    if verbose && outcome.is_ok() {
        println!(
            "{} Verified structure of document: {}",
            "✓".green(),
            path.display()
        );
    }

    Ok(Evaluation {
        path: path.to_path_buf(),
        document,
        outcome,
    })
}

/// The document itself, or every YAML document below a directory, sorted
pub fn collect_documents(path: &Path) -> Result<Vec<PathBuf>, EvaluationError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.exists() {
        return Err(EvaluationError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
        });
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|source| EvaluationError::Walk {
            path: path.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && utils::is_hdu_document(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    Ok(documents)
}
