use colored::*;
use evaluator::{collect_documents, evaluate_file, write_document, EvaluationError};
use std::path::Path;
use thiserror::Error;
use validators::LogSink;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("--output needs a single input document, found {0}")]
    OutputNeedsSingleDocument(usize),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub valid: usize,
    pub invalid: usize,
}

/// Verify one document or every document below a directory.
///
/// Warnings go to the process log. With `output`, the verified document
/// (fixes included) is written there.
pub fn verify_path(
    path: &Path,
    option: &str,
    output: Option<&Path>,
    verbose: bool,
) -> Result<Summary, RunError> {
    let documents = collect_documents(path)?;
    if output.is_some() && documents.len() != 1 {
        return Err(RunError::OutputNeedsSingleDocument(documents.len()));
    }

    let mut summary = Summary::default();
    println!("Verifying {} document(s)...", documents.len());

    for document_path in documents {
        match evaluate_file(&document_path, option, &mut LogSink, verbose) {
            Ok(evaluation) => match &evaluation.outcome {
                Ok(()) => {
                    println!("✅ Valid: {}", document_path.display());
                    summary.valid += 1;

                    if let Some(output) = output {
                        write_document(output, &evaluation.document)?;
                        logging::info(&format!("Wrote verified document to {}", output.display()));
                    }
                }
                Err(err) => {
                    println!("❌ Invalid: {}", document_path.display());
                    for line in err.report().unwrap_or_default().lines() {
                        println!("   {}", line);
                    }
                    summary.invalid += 1;
                }
            },
            Err(EvaluationError::Verify(err)) => {
                return Err(EvaluationError::Verify(err).into());
            }
            Err(e) => {
                println!("❌ Error processing {}: {}", document_path.display(), e);
                logging::error(&e.to_string());
                summary.invalid += 1;
            }
        }
    }

    println!(
        "\nSummary: {} valid, {} invalid",
        summary.valid.to_string().green(),
        summary.invalid.to_string().red()
    );

    Ok(summary)
}
