use evaluator::{collect_documents, evaluate_file, read_document, write_document, EvaluationError};
use models::hdu::{CardValue, HduKind};
use models::{VerifyError, VerifyWarning, WarningKind};
use std::fs;
use tempfile::TempDir;

const VALID_DOCUMENT: &str = r#"
hdus:
  - kind: primary
    header:
      - keyword: SIMPLE
        value: true
      - keyword: BITPIX
        value: 16
      - keyword: NAXIS
        value: 0
  - kind: bintable
    header:
      - keyword: XTENSION
        value: BINTABLE
      - keyword: BITPIX
        value: 8
      - keyword: NAXIS
        value: 2
      - keyword: PCOUNT
        value: 0
      - keyword: GCOUNT
        value: 1
"#;

// Primary HDU missing SIMPLE, table with a lower-case keyword
const FIXABLE_DOCUMENT: &str = r#"
hdus:
  - kind: primary
    header:
      - keyword: BITPIX
        value: 16
      - keyword: NAXIS
        value: 0
  - kind: bintable
    header:
      - keyword: XTENSION
        value: BINTABLE
      - keyword: BITPIX
        value: 8
      - keyword: NAXIS
        value: 2
      - keyword: PCOUNT
        value: 0
      - keyword: GCOUNT
        value: 1
      - keyword: tfields
        value: 3
"#;

fn write_temp(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_valid_document_is_silent() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "valid.yml", VALID_DOCUMENT);
    let mut warnings: Vec<VerifyWarning> = Vec::new();

    let evaluation = evaluate_file(&path, "exception", &mut warnings, false).unwrap();
    assert!(evaluation.is_valid());
    assert!(warnings.is_empty());
    assert_eq!(evaluation.document.hdus[1].kind, HduKind::Bintable);
}

#[test]
fn test_warn_reports_every_issue_as_a_line() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "broken.yml", FIXABLE_DOCUMENT);
    let mut warnings: Vec<VerifyWarning> = Vec::new();

    let evaluation = evaluate_file(&path, "warn", &mut warnings, false).unwrap();
    assert!(evaluation.is_valid());

    let issues: Vec<&str> = warnings
        .iter()
        .filter(|w| w.kind == WarningKind::Issue)
        .map(|w| w.message.as_str())
        .collect();
    assert_eq!(
        issues,
        vec![
            "HDU 0:",
            "    'SIMPLE' card does not exist.",
            "    'BITPIX' card at the wrong place (card 0).",
            "    'NAXIS' card at the wrong place (card 1).",
            "HDU 1:",
            "    Card 5:",
            "        Card 'tfields' keyword is not upper case.",
        ]
    );

    // warn never touches the document
    let original = read_document(&path).unwrap();
    assert_eq!(evaluation.document, original);
}

#[test]
fn test_fix_writes_back_repaired_document() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "broken.yml", FIXABLE_DOCUMENT);
    let output = dir.path().join("fixed.yml");
    let mut warnings: Vec<VerifyWarning> = Vec::new();

    let evaluation = evaluate_file(&path, "silentfix", &mut warnings, false).unwrap();
    assert!(evaluation.is_valid());
    assert!(warnings.is_empty());

    write_document(&output, &evaluation.document).unwrap();

    let mut again: Vec<VerifyWarning> = Vec::new();
    let reread = evaluate_file(&output, "exception", &mut again, false).unwrap();
    assert!(reread.is_valid());

    let primary = &reread.document.hdus[0];
    assert_eq!(primary.header[0].keyword, "SIMPLE");
    assert_eq!(primary.header[0].value, Some(CardValue::Logical(true)));
    assert_eq!(reread.document.hdus[1].header[5].keyword, "TFIELDS");
}

#[test]
fn test_exception_outcome_carries_report() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "broken.yml", FIXABLE_DOCUMENT);
    let mut warnings: Vec<VerifyWarning> = Vec::new();

    let evaluation = evaluate_file(&path, "exception", &mut warnings, false).unwrap();
    match &evaluation.outcome {
        Err(VerifyError::Unresolved { report }) => {
            assert!(report.starts_with("HDU 0:\n    'SIMPLE' card does not exist."));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(warnings.is_empty());
}

#[test]
fn test_invalid_option_fails_before_reading() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yml");
    let mut warnings: Vec<VerifyWarning> = Vec::new();

    let err = evaluate_file(&missing, "Foo", &mut warnings, false).unwrap_err();
    assert!(matches!(
        err,
        EvaluationError::Verify(VerifyError::InvalidOption(ref value)) if value == "Foo"
    ));
}

#[test]
fn test_malformed_yaml_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "bad.yml", "hdus: [kind: nowhere");
    let mut warnings: Vec<VerifyWarning> = Vec::new();

    let err = evaluate_file(&path, "warn", &mut warnings, false).unwrap_err();
    assert!(matches!(err, EvaluationError::Yaml { .. }));
    assert!(err.to_string().contains("bad.yml"));
}

#[test]
fn test_collect_documents_walks_directories() {
    let dir = TempDir::new().unwrap();
    write_temp(&dir, "b.yaml", VALID_DOCUMENT);
    write_temp(&dir, "a.yml", VALID_DOCUMENT);
    write_temp(&dir, "notes.txt", "not a document");
    fs::create_dir(dir.path().join("nested")).unwrap();
    write_temp(&dir, "nested/c.yml", VALID_DOCUMENT);

    let documents = collect_documents(dir.path()).unwrap();
    let names: Vec<String> = documents
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();
    assert_eq!(names, vec!["a.yml", "b.yaml", "nested/c.yml"]);

    let single = collect_documents(&documents[0]).unwrap();
    assert_eq!(single, vec![documents[0].clone()]);

    assert!(collect_documents(&dir.path().join("absent")).is_err());
}
