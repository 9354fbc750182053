use crate::policy::{run_option, Issue};
use crate::verify::Verify;
use models::hdu::{Card, CardValue, Hdu};
use models::{ErrorTree, VerifyOption};

pub const VALID_BITPIX: [i64; 6] = [8, 16, 32, 64, -32, -64];

const MAX_NAXIS: i64 = 999;

/// A card every header of a given kind must carry.
struct RequiredCard {
    keyword: &'static str,
    /// Required index in the header, or anywhere when `None`
    position: Option<usize>,
    test: fn(&CardValue) -> bool,
    /// Value used to insert or repair the card; unfixable when `None`
    fix_value: Option<CardValue>,
}

fn valid_bitpix(value: &CardValue) -> bool {
    value
        .as_integer()
        .map_or(false, |bitpix| VALID_BITPIX.contains(&bitpix))
}

fn valid_naxis(value: &CardValue) -> bool {
    value
        .as_integer()
        .map_or(false, |naxis| (0..=MAX_NAXIS).contains(&naxis))
}

fn simple_is_true(value: &CardValue) -> bool {
    value.as_logical() == Some(true)
}

fn is_image(value: &CardValue) -> bool {
    value.as_text().map(str::trim) == Some("IMAGE")
}

fn is_bintable(value: &CardValue) -> bool {
    value.as_text().map(str::trim) == Some("BINTABLE")
}

fn valid_pcount(value: &CardValue) -> bool {
    value.as_integer().map_or(false, |pcount| pcount >= 0)
}

fn valid_gcount(value: &CardValue) -> bool {
    value.as_integer() == Some(1)
}

fn required_cards(hdu: &Hdu) -> Vec<RequiredCard> {
    let mut cards = Vec::new();

    match hdu.kind.xtension() {
        None => cards.push(RequiredCard {
            keyword: "SIMPLE",
            position: Some(0),
            test: simple_is_true,
            fix_value: Some(CardValue::Logical(true)),
        }),
        Some(xtension) => {
            let test: fn(&CardValue) -> bool = if xtension == "IMAGE" {
                is_image
            } else {
                is_bintable
            };
            cards.push(RequiredCard {
                keyword: "XTENSION",
                position: Some(0),
                test,
                fix_value: Some(CardValue::from(xtension)),
            });
        }
    }

    cards.push(RequiredCard {
        keyword: "BITPIX",
        position: Some(1),
        test: valid_bitpix,
        fix_value: None,
    });
    cards.push(RequiredCard {
        keyword: "NAXIS",
        position: Some(2),
        test: valid_naxis,
        fix_value: Some(CardValue::Integer(0)),
    });

    if hdu.kind.is_extension() {
        cards.push(RequiredCard {
            keyword: "PCOUNT",
            position: None,
            test: valid_pcount,
            fix_value: Some(CardValue::Integer(0)),
        });
        cards.push(RequiredCard {
            keyword: "GCOUNT",
            position: None,
            test: valid_gcount,
            fix_value: Some(CardValue::Integer(1)),
        });
    }

    cards
}

fn check_required(
    hdu: &mut Hdu,
    required: &RequiredCard,
    option: VerifyOption,
    errs: &mut ErrorTree,
) {
    let keyword = required.keyword;
    let index = match hdu.position(keyword) {
        Some(index) => index,
        None => {
            let insert_at = required
                .position
                .unwrap_or(hdu.header.len())
                .min(hdu.header.len());
            let text = format!("'{}' card does not exist.", keyword);

            let issue = match &required.fix_value {
                Some(value) => {
                    let header = &mut hdu.header;
                    let card = Card::new(keyword, value.clone());
                    Issue::new(text)
                        .with_fix(move || header.insert(insert_at, card))
                        .fix_text(format!("Fixed by inserting a new '{}' card.", keyword))
                }
                None => Issue::unfixable(text),
            };
            errs.push(run_option(option, issue));
            return;
        }
    };

    if let Some(position) = required.position {
        if index != position {
            let move_to = position.min(hdu.header.len() - 1);
            let header = &mut hdu.header;
            errs.push(run_option(
                option,
                Issue::new(format!(
                    "'{}' card at the wrong place (card {}).",
                    keyword, index
                ))
                .with_fix(move || {
                    let card = header.remove(index);
                    header.insert(move_to, card);
                })
                .fix_text(format!(
                    "Fixed by moving it to the right place (card {}).",
                    move_to
                )),
            ));
        }
    }

    // The card may have moved above
    let index = match hdu.position(keyword) {
        Some(index) => index,
        None => return,
    };
    let value = hdu.header[index].value.clone();
    if value.as_ref().map_or(false, required.test) {
        return;
    }

    let shown = value.map_or_else(|| "undefined".to_string(), |v| v.to_string());
    let text = format!("'{}' card has invalid value {}.", keyword, shown);
    let issue = match &required.fix_value {
        Some(fix_value) => {
            let slot = &mut hdu.header[index].value;
            let fix_value = fix_value.clone();
            Issue::new(text)
                .with_fix(move || *slot = Some(fix_value))
                .fix_text(format!("Fixed '{}' card to meet the standard.", keyword))
        }
        None => Issue::unfixable(text),
    };
    errs.push(run_option(option, issue));
}

impl Verify for Hdu {
    fn error_tree(&mut self, option: VerifyOption) -> ErrorTree {
        let mut errs = ErrorTree::with_unit("Card");

        for required in required_cards(self) {
            check_required(self, &required, option, &mut errs);
        }

        for card in &mut self.header {
            errs.nest(card.error_tree(option));
        }

        errs
    }
}
