//! Property-based tests for the paginated fetch helper.
//!
//! Pages are generated as arbitrary splits of an arbitrary item list; the
//! helper must return every item exactly once, sorted by key, with equal keys
//! in arrival order, no matter how the list was split.

use access_provider::api::ApiError;
use access_provider::pagination::{CollectionQuery, Page, fetch_all};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Item {
    key: u8,
    arrival: usize,
}

/// Split `items` into pages of the given sizes; leftovers go on a final page.
fn paginate(items: Vec<Item>, sizes: &[usize]) -> Vec<Page<Item>> {
    let mut pages = Vec::new();
    let mut rest = items.into_iter().peekable();
    for size in sizes {
        if rest.peek().is_none() {
            break;
        }
        pages.push(rest.by_ref().take(*size).collect::<Vec<_>>());
    }
    let tail: Vec<_> = rest.collect();
    if !tail.is_empty() || pages.is_empty() {
        pages.push(tail);
    }

    let count = pages.len();
    pages
        .into_iter()
        .enumerate()
        .map(|(i, items)| {
            let token = (i + 1 < count).then(|| format!("tok{}", i + 1));
            Page::new(items, token)
        })
        .collect()
}

fn run(pages: Vec<Page<Item>>, filter: Option<&str>) -> (Vec<Item>, Vec<CollectionQuery>) {
    let mut remaining = pages.into_iter();
    let mut seen = Vec::new();
    let result = tokio_test::block_on(fetch_all(
        filter,
        |query: CollectionQuery| {
            seen.push(query);
            let page = remaining
                .next()
                .ok_or_else(|| ApiError::transport("asked past the last page"));
            async move { page }
        },
        |item: &Item| &item.key,
    ))
    .expect("scripted pages never fail");
    (result, seen)
}

proptest! {
    #[test]
    fn test_every_item_is_returned_in_stable_key_order(
        keys in prop::collection::vec(0u8..8, 0..40),
        sizes in prop::collection::vec(1usize..6, 0..10),
    ) {
        let items: Vec<Item> = keys
            .iter()
            .enumerate()
            .map(|(arrival, key)| Item { key: *key, arrival })
            .collect();
        let pages = paginate(items.clone(), &sizes);
        let page_count = pages.len();

        let (result, queries) = run(pages, None);

        let mut expected = items;
        expected.sort_by_key(|item| (item.key, item.arrival));
        prop_assert_eq!(result, expected);
        prop_assert_eq!(queries.len(), page_count);
    }

    #[test]
    fn test_filter_accompanies_every_page(
        filter in "[a-z]{1,8}",
        sizes in prop::collection::vec(1usize..4, 1..6),
    ) {
        let items: Vec<Item> = (0..12).map(|arrival| Item { key: 0, arrival }).collect();
        let pages = paginate(items, &sizes);

        let (_, queries) = run(pages, Some(&filter));

        for (i, query) in queries.iter().enumerate() {
            prop_assert_eq!(query.name.as_deref(), Some(filter.as_str()));
            prop_assert_eq!(query.is_first_page(), i == 0);
        }
    }
}
