//! Cursor pagination over list endpoints.
//!
//! Every list endpoint of the access-management API accepts an optional name
//! filter plus an opaque continuation token and answers with one [`Page`] of
//! items. Provider reads must materialise the whole logical collection in one
//! call, so [`fetch_all`] walks the pages until the token runs out and then
//! imposes a stable, caller-independent order on the result.
//!
//! # Example
//!
//! ```rust
//! use access_provider::pagination::{fetch_all, CollectionQuery, Page};
//!
//! # async fn example() -> Result<(), String> {
//! let pages = vec![
//!     Page::new(vec!["b".to_string()], Some("tok1".to_string())),
//!     Page::new(vec!["a".to_string()], None),
//! ];
//! let mut remaining = pages.into_iter();
//!
//! let names = fetch_all(
//!     None,
//!     |_query: CollectionQuery| {
//!         let page = remaining.next().ok_or_else(|| "exhausted".to_string());
//!         async move { page }
//!     },
//!     |name: &String| name.as_str(),
//! )
//! .await?;
//!
//! assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
//! # Ok(())
//! # }
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// One page returned by a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items carried by this page
    pub items: Vec<T>,
    /// Token for the next page; absent or empty on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Create a page from its items and continuation token.
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    /// Create a final page.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// The continuation token, if it signals that more pages follow.
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// Returns true when no further pages follow this one.
    pub fn is_last(&self) -> bool {
        self.continuation().is_none()
    }
}

/// Query parameters for a single list call.
///
/// The name filter is part of the query's identity: once set it is sent with
/// every page request, including those carrying a continuation token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionQuery {
    /// Server-side name filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Continuation token from the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl CollectionQuery {
    /// Create an unfiltered query for the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a first-page query with an optional name filter.
    ///
    /// An empty filter means "no filter".
    pub fn filtered(name: Option<&str>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
            page_token: None,
        }
    }

    /// Set the name filter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Derive the query for the page following `token`, keeping the filter.
    pub fn next_page(&self, token: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            page_token: Some(token.into()),
        }
    }

    /// Returns true when this query asks for the first page.
    pub fn is_first_page(&self) -> bool {
        self.page_token.as_deref().is_none_or(str::is_empty)
    }
}

/// Fetch every page of a collection and return the items sorted by `key`.
///
/// `list` is invoked once per page, strictly in sequence. The first error
/// aborts the walk and is returned unchanged; items accumulated so far are
/// dropped. The final ordering is ascending by `key`, ties kept in arrival
/// order.
///
/// There is no page cap: a server that never returns an empty continuation
/// token keeps this loop running.
///
/// # Errors
///
/// Returns the first error produced by `list`.
pub async fn fetch_all<T, E, F, Fut, K, S>(
    name_filter: Option<&str>,
    mut list: F,
    key: K,
) -> Result<Vec<T>, E>
where
    F: FnMut(CollectionQuery) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
    K: for<'a> Fn(&'a T) -> &'a S,
    S: Ord + ?Sized,
{
    let mut query = CollectionQuery::filtered(name_filter);
    let mut results = Vec::new();
    let mut pages = 0usize;

    loop {
        trace!(
            "Fetching page {} (filter: {:?}, token: {:?})",
            pages + 1,
            query.name,
            query.page_token
        );

        let page = list(query.clone()).await?;
        pages += 1;

        let next = page.continuation().map(str::to_string);
        results.extend(page.items);

        match next {
            Some(token) => query = query.next_page(token),
            None => break,
        }
    }

    // `sort_by` is stable, so equal keys keep their arrival order.
    results.sort_by(|a, b| key(a).cmp(key(b)));

    debug!(
        "Fetched {} items across {} page(s) (filter: {:?})",
        results.len(),
        pages,
        query.name
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        seq: usize,
    }

    fn item(name: &str, seq: usize) -> Item {
        Item {
            name: name.to_string(),
            seq,
        }
    }

    /// Scripted endpoint that replays a fixed sequence of responses and
    /// records every query it receives.
    #[derive(Clone)]
    struct Script {
        responses: Arc<Mutex<VecDeque<Result<Page<Item>, String>>>>,
        calls: Arc<Mutex<Vec<CollectionQuery>>>,
    }

    impl Script {
        fn new(responses: Vec<Result<Page<Item>, String>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(responses.into())),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn call(&self, query: CollectionQuery) -> impl Future<Output = Result<Page<Item>, String>> {
            self.calls.lock().unwrap().push(query);
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err("no scripted response left".to_string()));
            async move { response }
        }

        fn calls(&self) -> Vec<CollectionQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    async fn run(script: &Script, filter: Option<&str>) -> Result<Vec<Item>, String> {
        fetch_all(filter, |q| script.call(q), |i: &Item| i.name.as_str()).await
    }

    #[tokio::test]
    async fn test_two_pages_are_merged_and_sorted() {
        let script = Script::new(vec![
            Ok(Page::new(vec![item("b", 0)], Some("tok1".to_string()))),
            Ok(Page::new(vec![item("a", 1)], Some(String::new()))),
        ]);

        let result = run(&script, None).await.unwrap();
        let names: Vec<_> = result.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);

        let calls = script.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].is_first_page());
        assert_eq!(calls[1].page_token.as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_all_items_across_pages_are_returned() {
        let sizes = [3usize, 1, 4, 2];
        let mut seq = 0;
        let mut responses = Vec::new();
        for (idx, size) in sizes.iter().enumerate() {
            let items = (0..*size)
                .map(|_| {
                    seq += 1;
                    item(&format!("item-{seq:03}"), seq)
                })
                .collect();
            let token = (idx + 1 < sizes.len()).then(|| format!("tok{idx}"));
            responses.push(Ok(Page::new(items, token)));
        }
        let script = Script::new(responses);

        let result = run(&script, None).await.unwrap();
        assert_eq!(result.len(), sizes.iter().sum::<usize>());
        assert_eq!(script.calls().len(), sizes.len());
    }

    #[tokio::test]
    async fn test_single_page_makes_one_call() {
        let script = Script::new(vec![Ok(Page::last(vec![item("x", 0)]))]);

        let result = run(&script, Some("x")).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(script.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_single_page_yields_empty_result() {
        let script = Script::new(vec![Ok(Page::new(Vec::new(), Some(String::new())))]);

        let result = run(&script, None).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(script.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_sort_is_stable_across_page_boundaries() {
        let script = Script::new(vec![
            Ok(Page::new(
                vec![item("b", 0), item("a", 1)],
                Some("t".to_string()),
            )),
            Ok(Page::last(vec![item("c", 2), item("a", 3)])),
        ]);

        let result = run(&script, None).await.unwrap();
        let order: Vec<_> = result.iter().map(|i| (i.name.as_str(), i.seq)).collect();
        assert_eq!(order, vec![("a", 1), ("a", 3), ("b", 0), ("c", 2)]);
    }

    #[tokio::test]
    async fn test_error_on_first_call_returns_no_items() {
        let script = Script::new(vec![Err("boom".to_string())]);

        let result = run(&script, None).await;
        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(script.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_error_mid_walk_discards_partial_results() {
        let script = Script::new(vec![
            Ok(Page::new(vec![item("a", 0)], Some("t1".to_string()))),
            Err("page two failed".to_string()),
            Ok(Page::last(vec![item("c", 2)])),
        ]);

        let result = run(&script, None).await;
        assert_eq!(result, Err("page two failed".to_string()));
        // The third page is never requested.
        assert_eq!(script.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_name_filter_is_sent_with_every_page() {
        let script = Script::new(vec![
            Ok(Page::new(vec![item("prod-a", 0)], Some("t1".to_string()))),
            Ok(Page::new(vec![item("prod-b", 1)], Some("t2".to_string()))),
            Ok(Page::last(vec![item("prod-c", 2)])),
        ]);

        run(&script, Some("prod")).await.unwrap();

        let calls = script.calls();
        assert_eq!(calls.len(), 3);
        for call in &calls {
            assert_eq!(call.name.as_deref(), Some("prod"));
        }
        assert_eq!(calls[2].page_token.as_deref(), Some("t2"));
    }

    #[tokio::test]
    async fn test_empty_filter_means_no_filter() {
        let script = Script::new(vec![Ok(Page::last(Vec::new()))]);

        run(&script, Some("")).await.unwrap();
        assert_eq!(script.calls()[0].name, None);
    }

    #[test]
    fn test_page_continuation() {
        assert!(Page::<u8>::new(Vec::new(), None).is_last());
        assert!(Page::<u8>::new(Vec::new(), Some(String::new())).is_last());
        assert_eq!(
            Page::<u8>::new(Vec::new(), Some("abc".to_string())).continuation(),
            Some("abc")
        );
    }

    #[test]
    fn test_next_page_keeps_filter() {
        let query = CollectionQuery::new().with_name("ops");
        let next = query.next_page("tok");
        assert_eq!(next.name.as_deref(), Some("ops"));
        assert!(!next.is_first_page());
    }
}
