use crate::policy::UNFIXABLE_PREFIX;
use models::{ErrorTree, VerifyError, VerifyOption, VerifyWarning, WarningKind};

pub const BANNER: &str = "Output verification result:";
pub const INDEXING_NOTE: &str = "Note: hduverify uses zero-based indexing.";

/// A node that can check itself and its sub-components.
pub trait Verify {
    /// Build the error tree for this node, applying `option` to every issue
    /// found. Each visited sub-component must contribute a nested tree, even
    /// an empty one.
    fn error_tree(&mut self, option: VerifyOption) -> ErrorTree;
}

/// Receiver of verification warnings.
pub trait WarningSink {
    fn warn(&mut self, warning: VerifyWarning);
}

impl WarningSink for Vec<VerifyWarning> {
    fn warn(&mut self, warning: VerifyWarning) {
        self.push(warning);
    }
}

/// Forwards warnings to the process log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&mut self, warning: VerifyWarning) {
        logging::warning(&warning.message);
    }
}

/// Verify `target`, reporting warnings to the process log.
pub fn verify<T>(target: &mut T, option: &str) -> Result<(), VerifyError>
where
    T: Verify + ?Sized,
{
    verify_with(target, option, &mut LogSink)
}

/// Verify `target` with the named option, reporting warnings to `sink`.
///
/// `option` is matched case-insensitively. Unfixable problems fail a
/// `fix`/`silentfix` run, any problem fails an `exception` run, and `warn`
/// and `fix` runs announce the report line by line.
pub fn verify_with<T, S>(target: &mut T, option: &str, sink: &mut S) -> Result<(), VerifyError>
where
    T: Verify + ?Sized,
    S: WarningSink + ?Sized,
{
    let option: VerifyOption = option.parse()?;

    if option == VerifyOption::Ignore {
        return Ok(());
    }

    logging::debug(&format!("Running verification with option '{}'", option));

    let rendered = target.error_tree(option).render(0);
    let report = rendered.trim_end();

    if option.is_fix() && report.contains(UNFIXABLE_PREFIX) {
        return Err(VerifyError::Unresolved {
            report: report.to_string(),
        });
    }

    if option.emits_warnings() && !report.is_empty() {
        sink.warn(VerifyWarning::new(WarningKind::Banner, BANNER));
        for line in report.lines() {
            sink.warn(VerifyWarning::new(WarningKind::Issue, line));
        }
        sink.warn(VerifyWarning::new(WarningKind::Note, INDEXING_NOTE));
    }

    if option == VerifyOption::Exception && !report.is_empty() {
        return Err(VerifyError::Unresolved {
            report: report.to_string(),
        });
    }

    Ok(())
}
