use crate::policy::{run_option, Issue};
use crate::verify::Verify;
use models::hdu::{Hdu, HduKind, HduList};
use models::{ErrorTree, VerifyOption};

impl Verify for HduList {
    fn error_tree(&mut self, option: VerifyOption) -> ErrorTree {
        let mut errs = ErrorTree::with_unit("HDU");

        let first_kind = self.hdus.first().map(|hdu| hdu.kind);
        if first_kind != Some(HduKind::Primary) {
            let hdus = &mut self.hdus;
            errs.push(run_option(
                option,
                Issue::new("HDUList's 0th element is not a primary HDU.")
                    .with_fix(move || hdus.insert(0, Hdu::minimal_primary()))
                    .fix_text("Fixed by inserting one as 0th HDU."),
            ));
        }

        for (index, hdu) in self.hdus.iter().enumerate().skip(1) {
            if !hdu.kind.is_extension() {
                errs.push(run_option(
                    option,
                    Issue::unfixable(format!(
                        "HDUList's element {} is not an extension HDU.",
                        index
                    )),
                ));
            }
        }

        for hdu in &mut self.hdus {
            errs.nest(hdu.error_tree(option));
        }

        errs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::verify_with;
    use models::hdu::{Card, CardValue};
    use models::VerifyWarning;

    fn image_hdu() -> Hdu {
        Hdu {
            kind: HduKind::Image,
            header: vec![
                Card::new("XTENSION", "IMAGE"),
                Card::new("BITPIX", -32),
                Card::new("NAXIS", 2),
                Card::new("PCOUNT", 0),
                Card::new("GCOUNT", 1),
            ],
        }
    }

    fn valid_list() -> HduList {
        HduList {
            hdus: vec![Hdu::minimal_primary(), image_hdu()],
        }
    }

    #[test]
    fn test_valid_list_passes_exception() {
        let mut list = valid_list();
        let mut warnings: Vec<VerifyWarning> = Vec::new();

        assert_eq!(verify_with(&mut list, "exception", &mut warnings), Ok(()));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_primary_is_inserted() {
        let mut list = HduList {
            hdus: vec![image_hdu()],
        };

        let rendered = list.error_tree(VerifyOption::SilentFix).render(0);
        assert_eq!(
            rendered,
            "HDUList's 0th element is not a primary HDU.  Fixed by inserting one as 0th HDU.\n"
        );
        assert_eq!(list, valid_list());
    }

    #[test]
    fn test_empty_list_gets_primary() {
        let mut list = HduList::default();

        let mut warnings: Vec<VerifyWarning> = Vec::new();
        assert_eq!(verify_with(&mut list, "silentfix", &mut warnings), Ok(()));
        assert_eq!(list.hdus, vec![Hdu::minimal_primary()]);
    }

    #[test]
    fn test_second_primary_is_unfixable() {
        let mut list = HduList {
            hdus: vec![Hdu::minimal_primary(), Hdu::minimal_primary()],
        };
        let mut warnings: Vec<VerifyWarning> = Vec::new();

        let err = verify_with(&mut list, "fix", &mut warnings).unwrap_err();
        assert_eq!(
            err.report(),
            Some("Unfixable error: HDUList's element 1 is not an extension HDU.")
        );
    }

    #[test]
    fn test_report_tracks_hdu_and_card_indices() {
        let mut list = valid_list();
        list.hdus[1].header[2].value = Some(CardValue::Integer(-1));
        list.hdus[1].header.push(Card::new("exptime", 30.0));

        let mut warnings: Vec<VerifyWarning> = Vec::new();
        let err = verify_with(&mut list, "exception", &mut warnings).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\nHDU 1:\n    'NAXIS' card has invalid value -1.\n    Card 5:\n        Card 'exptime' keyword is not upper case."
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_fix_repairs_nested_levels() {
        let mut list = valid_list();
        list.hdus[1].header[2].value = Some(CardValue::Integer(-1));
        list.hdus[1].header.push(Card::new("exptime", 30.0));
        let mut warnings: Vec<VerifyWarning> = Vec::new();

        assert_eq!(verify_with(&mut list, "fix", &mut warnings), Ok(()));
        assert_eq!(list.hdus[1].header[2].value, Some(CardValue::Integer(0)));
        assert_eq!(list.hdus[1].header[5].keyword, "EXPTIME");

        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages.len(), 6);
        assert_eq!(messages[1], "HDU 1:");
        assert_eq!(
            messages[2],
            "    'NAXIS' card has invalid value -1.  Fixed 'NAXIS' card to meet the standard."
        );
        assert_eq!(messages[3], "    Card 5:");
    }
}
