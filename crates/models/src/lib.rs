mod error_tree;

pub use error_tree::{ErrorEntry, ErrorItem, ErrorTree, DEFAULT_UNIT};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How detected problems are handled by a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyOption {
    /// Fix what can be fixed and report everything
    Fix,
    /// Fix what can be fixed without reporting
    SilentFix,
    /// Skip verification entirely
    Ignore,
    /// Report problems as warnings
    #[default]
    Warn,
    /// Fail on any problem
    Exception,
}

impl VerifyOption {
    pub const ALL: [VerifyOption; 5] = [
        VerifyOption::Fix,
        VerifyOption::SilentFix,
        VerifyOption::Ignore,
        VerifyOption::Warn,
        VerifyOption::Exception,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyOption::Fix => "fix",
            VerifyOption::SilentFix => "silentfix",
            VerifyOption::Ignore => "ignore",
            VerifyOption::Warn => "warn",
            VerifyOption::Exception => "exception",
        }
    }

    pub fn is_fix(&self) -> bool {
        matches!(self, VerifyOption::Fix | VerifyOption::SilentFix)
    }

    pub fn emits_warnings(&self) -> bool {
        !matches!(self, VerifyOption::SilentFix | VerifyOption::Exception)
    }
}

impl FromStr for VerifyOption {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fix" => Ok(VerifyOption::Fix),
            "silentfix" => Ok(VerifyOption::SilentFix),
            "ignore" => Ok(VerifyOption::Ignore),
            "warn" => Ok(VerifyOption::Warn),
            "exception" => Ok(VerifyOption::Exception),
            _ => Err(VerifyError::InvalidOption(s.to_string())),
        }
    }
}

impl fmt::Display for VerifyOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Option {0} not recognized.")]
    InvalidOption(String),

    /// Problems the requested option could not resolve silently.
    #[error("\n{report}")]
    Unresolved { report: String },
}

impl VerifyError {
    pub fn report(&self) -> Option<&str> {
        match self {
            VerifyError::Unresolved { report } => Some(report),
            VerifyError::InvalidOption(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Announces that a report follows
    Banner,
    /// One line of the report
    Issue,
    /// Trailing informational note
    Note,
}

/// A non-fatal verification event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl VerifyWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        VerifyWarning {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for VerifyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// FITS-like document models
pub mod hdu {
    use serde::{Deserialize, Serialize};
    use std::fmt;

    /// An ordered list of header/data units, the root of a document
    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    pub struct HduList {
        #[serde(default)]
        pub hdus: Vec<Hdu>,
    }

    /// The kind of a header/data unit
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum HduKind {
        Primary,
        Image,
        Bintable,
    }

    impl HduKind {
        pub fn is_extension(&self) -> bool {
            !matches!(self, HduKind::Primary)
        }

        /// Expected value of the XTENSION card, if this kind is an extension
        pub fn xtension(&self) -> Option<&'static str> {
            match self {
                HduKind::Primary => None,
                HduKind::Image => Some("IMAGE"),
                HduKind::Bintable => Some("BINTABLE"),
            }
        }
    }

    /// A header/data unit. Only the header is modelled.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Hdu {
        pub kind: HduKind,

        #[serde(default)]
        pub header: Vec<Card>,
    }

    impl Hdu {
        pub fn new(kind: HduKind) -> Self {
            Hdu {
                kind,
                header: Vec::new(),
            }
        }

        /// Smallest valid primary HDU: no data array
        pub fn minimal_primary() -> Self {
            Hdu {
                kind: HduKind::Primary,
                header: vec![
                    Card::new("SIMPLE", true),
                    Card::new("BITPIX", 8),
                    Card::new("NAXIS", 0),
                ],
            }
        }

        /// Index of the first card whose keyword matches, ignoring case
        pub fn position(&self, keyword: &str) -> Option<usize> {
            self.header
                .iter()
                .position(|card| card.keyword.eq_ignore_ascii_case(keyword))
        }

        pub fn get(&self, keyword: &str) -> Option<&Card> {
            self.position(keyword).map(|idx| &self.header[idx])
        }
    }

    /// A single keyword record of a header
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Card {
        pub keyword: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub value: Option<CardValue>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub comment: Option<String>,
    }

    impl Card {
        pub fn new(keyword: impl Into<String>, value: impl Into<CardValue>) -> Self {
            Card {
                keyword: keyword.into(),
                value: Some(value.into()),
                comment: None,
            }
        }

        pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
            self.comment = Some(comment.into());
            self
        }
    }

    /// Card values. Untagged so documents read naturally as YAML scalars.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum CardValue {
        Logical(bool),
        Integer(i64),
        Real(f64),
        Text(String),
    }

    impl CardValue {
        pub fn as_logical(&self) -> Option<bool> {
            match self {
                CardValue::Logical(b) => Some(*b),
                _ => None,
            }
        }

        pub fn as_integer(&self) -> Option<i64> {
            match self {
                CardValue::Integer(i) => Some(*i),
                _ => None,
            }
        }

        pub fn as_text(&self) -> Option<&str> {
            match self {
                CardValue::Text(s) => Some(s),
                _ => None,
            }
        }
    }

    impl From<bool> for CardValue {
        fn from(value: bool) -> Self {
            CardValue::Logical(value)
        }
    }

    impl From<i64> for CardValue {
        fn from(value: i64) -> Self {
            CardValue::Integer(value)
        }
    }

    impl From<i32> for CardValue {
        fn from(value: i32) -> Self {
            CardValue::Integer(value as i64)
        }
    }

    impl From<f64> for CardValue {
        fn from(value: f64) -> Self {
            CardValue::Real(value)
        }
    }

    impl From<&str> for CardValue {
        fn from(value: &str) -> Self {
            CardValue::Text(value.to_string())
        }
    }

    impl From<String> for CardValue {
        fn from(value: String) -> Self {
            CardValue::Text(value)
        }
    }

    impl fmt::Display for CardValue {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CardValue::Logical(true) => write!(f, "T"),
                CardValue::Logical(false) => write!(f, "F"),
                CardValue::Integer(i) => write!(f, "{}", i),
                CardValue::Real(r) => write!(f, "{:?}", r),
                CardValue::Text(s) => write!(f, "'{}'", s),
            }
        }
    }
}
