//! Property-based tests for the navigation merge.
//!
//! These tests use proptest to generate random navigation trees and verify
//! that the merge invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::merge::{merge_all, merge_configs, namespace_page};
    use proptest::prelude::*;
    use serde_json::{json, Value as JsonValue};

    fn page() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z][a-z0-9_-]{0,8}(/[a-z0-9_-]{1,8}){0,2}",
            "docs/[a-z][a-z0-9_-]{0,8}",
        ]
    }

    fn namespace() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,12}"
    }

    /// A group with pages and up to three levels of nested groups.
    fn group() -> impl Strategy<Value = JsonValue> {
        let leaf = ("[A-Z][a-z]{0,8}", prop::collection::vec(page(), 0..4))
            .prop_map(|(name, pages)| json!({"group": name, "pages": pages}));
        leaf.prop_recursive(3, 24, 3, |inner| {
            (
                "[A-Z][a-z]{0,8}",
                prop::collection::vec(page(), 0..3),
                prop::collection::vec(inner, 0..3),
            )
                .prop_map(|(name, pages, groups)| {
                    json!({"group": name, "pages": pages, "groups": groups})
                })
        })
    }

    fn tab() -> impl Strategy<Value = JsonValue> {
        (
            "[A-Z][a-z]{0,8}",
            prop::collection::vec(page(), 0..3),
            prop::collection::vec(group(), 0..3),
        )
            .prop_map(|(name, pages, groups)| json!({"tab": name, "pages": pages, "groups": groups}))
    }

    fn config() -> impl Strategy<Value = JsonValue> {
        ("[a-z]{1,8}", prop::collection::vec(tab(), 0..4)).prop_map(|(theme, tabs)| {
            json!({"theme": theme, "navigation": {"tabs": tabs}})
        })
    }

    /// Every string inside every `pages` array, depth first.
    fn collect_pages(value: &JsonValue, out: &mut Vec<String>) {
        match value {
            JsonValue::Object(map) => {
                for (key, child) in map {
                    if key == "pages" {
                        if let Some(pages) = child.as_array() {
                            out.extend(pages.iter().filter_map(|p| p.as_str()).map(String::from));
                        }
                    } else {
                        collect_pages(child, out);
                    }
                }
            }
            JsonValue::Array(items) => items.iter().for_each(|item| collect_pages(item, out)),
            _ => {}
        }
    }

    fn tabs(config: &JsonValue) -> Vec<JsonValue> {
        config["navigation"]["tabs"].as_array().cloned().unwrap_or_default()
    }

    proptest! {
        /// Property: main's tabs come first, untouched, followed by as many
        /// tabs as the sub had
        #[test]
        fn main_tabs_are_a_verbatim_prefix(main in config(), sub in config(), ns in namespace()) {
            let merged = merge_configs(&main, &sub, &ns).unwrap();
            let merged_tabs = tabs(&merged);
            let main_tabs = tabs(&main);

            prop_assert_eq!(merged_tabs.len(), main_tabs.len() + tabs(&sub).len());
            prop_assert_eq!(&merged_tabs[..main_tabs.len()], &main_tabs[..]);
        }

        /// Property: every sub page appears once, namespaced, in the same order
        #[test]
        fn every_sub_page_is_prefixed_once(main in config(), sub in config(), ns in namespace()) {
            let merged = merge_configs(&main, &sub, &ns).unwrap();
            let main_tab_count = tabs(&main).len();

            let mut expected = Vec::new();
            for tab in tabs(&sub) {
                collect_pages(&tab, &mut expected);
            }
            let expected: Vec<String> = expected.iter().map(|p| namespace_page(p, &ns)).collect();

            let mut actual = Vec::new();
            for tab in &tabs(&merged)[main_tab_count..] {
                collect_pages(tab, &mut actual);
            }

            prop_assert_eq!(actual, expected);
        }

        /// Property: rewritten pages always live under docs/<namespace>/
        #[test]
        fn namespaced_pages_start_with_namespace(page in page(), ns in namespace()) {
            let prefix = format!("docs/{}/", ns);
            prop_assert!(namespace_page(&page, &ns).starts_with(&prefix));
        }

        /// Property: "x" and "docs/x" normalize to the same reference
        #[test]
        fn docs_segment_is_normalized(page in "[a-z][a-z0-9/_-]{0,16}", ns in namespace()) {
            prop_assume!(!page.starts_with("docs/"));
            let with_root = format!("docs/{}", page);
            prop_assert_eq!(namespace_page(&page, &ns), namespace_page(&with_root, &ns));
        }

        /// Property: the sub never changes main's non-navigation fields
        #[test]
        fn main_fields_take_precedence(main in config(), sub in config(), ns in namespace()) {
            let merged = merge_configs(&main, &sub, &ns).unwrap();
            prop_assert_eq!(&merged["theme"], &main["theme"]);
        }

        /// Property: folding equals merging one sub at a time
        #[test]
        fn fold_matches_sequential_merges(
            main in config(),
            first in config(),
            second in config(),
        ) {
            let folded = merge_all(main.clone(), [("one", &first), ("two", &second)]).unwrap();
            let step = merge_configs(&main, &first, "one").unwrap();
            let sequential = merge_configs(&step, &second, "two").unwrap();
            prop_assert_eq!(folded, sequential);
        }
    }
}
