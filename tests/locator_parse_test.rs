// Property tests for selector-list parsing
//
// Tests cover:
// - every top-level item becomes one strategy, in order
// - commas inside quoted has-text filters never split
// - whitespace-only lists are rejected

use page_objects::{By, Locator};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

proptest! {
    #[test]
    fn prop_ids_and_classes_keep_order(items in prop::collection::vec((any::<bool>(), ident()), 1..6)) {
        let list = items
            .iter()
            .map(|(is_id, name)| if *is_id { format!("#{name}") } else { format!(".{name}") })
            .collect::<Vec<_>>()
            .join(", ");

        let locator = Locator::parse_fallbacks("generated", &list).unwrap();
        let expected: Vec<By> = items
            .iter()
            .map(|(is_id, name)| if *is_id { By::css(format!("#{name}")) } else { By::css(format!(".{name}")) })
            .collect();
        prop_assert_eq!(locator.strategies(), expected.as_slice());
    }

    #[test]
    fn prop_quoted_commas_do_not_split(tag in ident(), words in prop::collection::vec("[A-Za-z]{1,6}", 2..4)) {
        let text = words.join(", ");
        let list = format!("#first, {tag}:has-text(\"{text}\")");

        let locator = Locator::parse_fallbacks("quoted", &list).unwrap();
        prop_assert_eq!(locator.strategies().len(), 2);
        prop_assert_eq!(&locator.strategies()[1], &By::has_text(tag, text));
    }

    #[test]
    fn prop_blank_lists_rejected(blank in "[ ,\t]{0,10}") {
        prop_assert!(Locator::parse_fallbacks("blank", &blank).is_err());
    }
}

#[test]
fn test_xpath_and_engine_prefixes() {
    let locator =
        Locator::parse_fallbacks("mixed", "//form//input[@name='q'], text=Search, id=q").unwrap();
    assert_eq!(
        locator.strategies(),
        &[
            By::xpath("//form//input[@name='q']"),
            By::text("Search"),
            By::id("q"),
        ]
    );
}
