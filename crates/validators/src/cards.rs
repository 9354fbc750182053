use crate::policy::{run_option, Issue};
use crate::verify::Verify;
use lazy_static::lazy_static;
use models::hdu::{Card, CardValue};
use models::{ErrorTree, VerifyOption};
use regex::Regex;

const MAX_KEYWORD_LEN: usize = 8;

lazy_static! {
    static ref KEYWORD_PATTERN: Regex =
        Regex::new(r"^[A-Z0-9_-]*$").expect("Failed to compile keyword regex");
}

fn is_printable(c: char) -> bool {
    (' '..='~').contains(&c)
}

impl Verify for Card {
    fn error_tree(&mut self, option: VerifyOption) -> ErrorTree {
        let mut errs = ErrorTree::unlabelled();
        let keyword = self.keyword.clone();

        if keyword.len() > MAX_KEYWORD_LEN {
            errs.push(run_option(
                option,
                Issue::unfixable(format!(
                    "Card '{}' keyword is longer than {} characters.",
                    keyword, MAX_KEYWORD_LEN
                )),
            ));
        }

        let upper = keyword.to_ascii_uppercase();
        if upper != keyword {
            let slot = &mut self.keyword;
            let fixed = upper.clone();
            errs.push(run_option(
                option,
                Issue::new(format!("Card '{}' keyword is not upper case.", keyword))
                    .with_fix(move || *slot = fixed)
                    .fix_text(format!("Fixed by renaming it to '{}'.", upper)),
            ));
        }

        if !KEYWORD_PATTERN.is_match(&upper) {
            errs.push(run_option(
                option,
                Issue::unfixable(format!(
                    "Card '{}' keyword has characters outside [A-Z0-9_-].",
                    keyword
                )),
            ));
        }

        let unprintable = matches!(&self.value, Some(CardValue::Text(text)) if !text.chars().all(is_printable));
        if unprintable {
            errs.push(run_option(
                option,
                Issue::unfixable(format!(
                    "Card '{}' string value has non-printable characters.",
                    keyword
                )),
            ));
        }

        let stripped = self
            .comment
            .as_deref()
            .filter(|comment| !comment.is_ascii())
            .map(|comment| comment.chars().filter(char::is_ascii).collect::<String>());
        if let Some(stripped) = stripped {
            let slot = &mut self.comment;
            errs.push(run_option(
                option,
                Issue::new(format!("Card '{}' comment has non-ASCII characters.", keyword))
                    .with_fix(move || *slot = Some(stripped))
                    .fix_text("Fixed by removing them."),
            ));
        }

        errs
    }
}
