use models::VerifyOption;
use std::fmt;

/// Leading text of every message that no option can fix.
pub const UNFIXABLE_PREFIX: &str = "Unfixable error: ";

pub const DEFAULT_FIX_TEXT: &str = "Fixed.";

/// One problem found while checking a node, with its optional repair.
pub struct Issue<'a> {
    text: String,
    fix_text: String,
    fix: Option<Box<dyn FnOnce() + 'a>>,
    fixable: bool,
}

impl<'a> Issue<'a> {
    /// A fixable issue. Attach the repair with [`Issue::with_fix`].
    pub fn new(text: impl Into<String>) -> Self {
        Issue {
            text: text.into(),
            fix_text: DEFAULT_FIX_TEXT.to_string(),
            fix: None,
            fixable: true,
        }
    }

    pub fn unfixable(text: impl Into<String>) -> Self {
        Issue {
            fixable: false,
            ..Issue::new(text)
        }
    }

    pub fn with_fix(mut self, fix: impl FnOnce() + 'a) -> Self {
        self.fix = Some(Box::new(fix));
        self
    }

    pub fn fix_text(mut self, fix_text: impl Into<String>) -> Self {
        self.fix_text = fix_text.into();
        self
    }

    pub fn is_fixable(&self) -> bool {
        self.fixable
    }
}

impl fmt::Debug for Issue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Issue")
            .field("text", &self.text)
            .field("fix_text", &self.fix_text)
            .field("has_fix", &self.fix.is_some())
            .field("fixable", &self.fixable)
            .finish()
    }
}

// Effective handling of a single issue once fixability is taken into account
enum Resolution {
    Report,
    Unfixable,
    Fix,
}

fn resolve(option: VerifyOption, fixable: bool) -> Resolution {
    if !fixable {
        return Resolution::Unfixable;
    }

    match option {
        VerifyOption::Warn | VerifyOption::Exception => Resolution::Report,
        VerifyOption::Fix | VerifyOption::SilentFix | VerifyOption::Ignore => Resolution::Fix,
    }
}

/// Apply `option` to one issue and return the text to record for it.
///
/// Unfixable issues are always prefixed with [`UNFIXABLE_PREFIX`]. The fix
/// only runs for the fixing options, and its text is suffixed with the
/// issue's fix text.
pub fn run_option(option: VerifyOption, issue: Issue<'_>) -> String {
    let Issue {
        text,
        fix_text,
        fix,
        fixable,
    } = issue;

    match resolve(option, fixable) {
        Resolution::Report => text,
        Resolution::Unfixable => format!("{}{}", UNFIXABLE_PREFIX, text),
        Resolution::Fix => {
            if let Some(fix) = fix {
                fix();
            }
            format!("{}  {}", text, fix_text)
        }
    }
}
