//! Listing behaviour against the in-memory API.
//!
//! Every test uses a page size small enough that the collections involved
//! span several pages, so the continuation path is always exercised.

mod common;

use access_provider::api::{AccessApi, ApiError, InMemoryAccessApi, listing};
use access_provider::models::UpsertGroup;
use access_provider::pagination::{CollectionQuery, Page, fetch_all};
use access_provider::ProviderError;
use common::{SMALL_PAGE, add_users, api, names, seed_access_scopes, seed_groups, seed_integration};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_listing_returns_every_group_sorted_by_name() {
    let api = api(SMALL_PAGE);
    seed_groups(&api, &["delta", "alpha", "echo", "charlie", "bravo"]).await;

    let groups = assert_ok!(listing::list_groups(&api, None).await);

    assert_eq!(
        names(&groups, |g| g.name.as_str()),
        vec!["alpha", "bravo", "charlie", "delta", "echo"]
    );
    // 5 items at 2 per page
    assert_eq!(api.call_count("list_groups").await, 3);
}

#[tokio::test]
async fn test_single_page_listing_makes_one_call() {
    let api = api(10);
    seed_groups(&api, &["ops", "dev"]).await;

    let groups = assert_ok!(listing::list_groups(&api, None).await);

    assert_eq!(groups.len(), 2);
    assert_eq!(api.call_count("list_groups").await, 1);
}

#[tokio::test]
async fn test_empty_collection_lists_as_empty() {
    let api = api(SMALL_PAGE);

    let bundles = assert_ok!(listing::list_bundles(&api, None).await);

    assert!(bundles.is_empty());
    assert_eq!(api.call_count("list_bundles").await, 1);
}

#[tokio::test]
async fn test_failure_on_second_of_three_pages_fails_the_listing() {
    let api = api(SMALL_PAGE);
    seed_groups(&api, &["a", "b", "c", "d", "e"]).await;
    api.fail_after("list_groups", 1, ApiError::remote(503, "unavailable"))
        .await;

    let err = assert_err!(listing::list_groups(&api, None).await);

    assert!(matches!(
        err.api_error(),
        Some(ApiError::Remote { status: 503, .. })
    ));
    // The third page is never requested.
    assert_eq!(api.call_count("list_groups").await, 2);
}

#[tokio::test]
async fn test_failure_on_first_page_names_the_filter() {
    let api = api(SMALL_PAGE);
    api.fail_after("list_access_scopes", 0, ApiError::transport("connection reset"))
        .await;

    let err = assert_err!(listing::list_access_scopes(&api, Some("prod")).await);

    assert_eq!(
        err.to_string(),
        "Failed to list access scopes 'name=prod': Transport error: connection reset"
    );
}

#[tokio::test]
async fn test_name_filter_survives_every_page() {
    let api = api(SMALL_PAGE);
    seed_access_scopes(
        &api,
        &["prod-db", "staging-db", "prod-s3", "dev-s3", "prod-k8s", "prod-vpn", "prod-iam"],
    )
    .await;

    // The in-memory API rejects a continuation token presented with a
    // different filter, so a successful multi-page walk proves the filter
    // went out with every request.
    let scopes = assert_ok!(listing::list_access_scopes(&api, Some("PROD")).await);

    assert_eq!(
        names(&scopes, |s| s.name.as_str()),
        vec!["prod-db", "prod-iam", "prod-k8s", "prod-s3", "prod-vpn"]
    );
    assert_eq!(api.call_count("list_access_scopes").await, 3);
}

#[tokio::test]
async fn test_dropping_the_filter_mid_walk_is_rejected() {
    let api = api(SMALL_PAGE);
    seed_groups(&api, &["team-a", "team-b", "team-c", "other"]).await;

    let first = assert_ok!(api.list_groups(CollectionQuery::filtered(Some("team"))).await);
    let token = first.next_page_token.expect("filtered listing spans two pages");

    let unfiltered_follow_up = CollectionQuery::new().next_page(token);
    let err = assert_err!(api.list_groups(unfiltered_follow_up).await);
    assert!(matches!(err, ApiError::InvalidPageToken { .. }));
}

#[tokio::test]
async fn test_group_members_are_listed_by_email() {
    let api = api(SMALL_PAGE);
    let emails = [
        "zoe@example.com",
        "adam@example.com",
        "mia@example.com",
        "li@example.com",
        "bo@example.com",
    ];
    add_users(&api, &emails).await;
    let group = assert_ok!(
        api.create_group(UpsertGroup {
            name: "everyone".to_string(),
            members_emails: emails.iter().map(|e| e.to_string()).collect(),
        })
        .await
    );

    let members = assert_ok!(listing::list_group_members(&api, &group.id).await);

    assert_eq!(
        names(&members, |m| m.email.as_str()),
        vec![
            "adam@example.com",
            "bo@example.com",
            "li@example.com",
            "mia@example.com",
            "zoe@example.com"
        ]
    );
}

#[tokio::test]
async fn test_members_of_missing_group_report_the_group_id() {
    let api = api(SMALL_PAGE);

    let err = assert_err!(listing::list_group_members(&api, "g-missing").await);

    assert!(err.is_not_found());
    assert!(err.to_string().contains("g-missing"));
}

#[tokio::test]
async fn test_listings_of_different_kinds_run_concurrently() {
    let api = api(SMALL_PAGE);
    seed_groups(&api, &["g3", "g1", "g2"]).await;
    seed_access_scopes(&api, &["s2", "s1", "s3", "s4"]).await;
    seed_integration(&api, "okta", "okta", &["okta-group"]).await;
    seed_integration(&api, "aws", "aws", &["aws-iam-role"]).await;
    seed_integration(&api, "github", "github", &["github-team"]).await;

    let (groups, scopes, integrations) = assert_ok!(
        futures::try_join!(
            listing::list_groups(&api, None),
            listing::list_access_scopes(&api, None),
            listing::list_integrations(&api, None),
        )
    );

    assert_eq!(names(&groups, |g| g.name.as_str()), vec!["g1", "g2", "g3"]);
    assert_eq!(names(&scopes, |s| s.name.as_str()), vec!["s1", "s2", "s3", "s4"]);
    assert_eq!(
        names(&integrations, |i| i.name.as_str()),
        vec!["aws", "github", "okta"]
    );
}

#[tokio::test]
async fn test_same_listing_twice_is_identical() {
    let api = api(SMALL_PAGE);
    seed_groups(&api, &["m", "c", "x", "a", "q"]).await;

    let first = assert_ok!(listing::list_groups(&api, None).await);
    let second = assert_ok!(listing::list_groups(&api, None).await);

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_listing_can_be_abandoned_with_a_timeout() {
    let never_answers = fetch_all(
        None,
        |_query: CollectionQuery| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, ApiError>(Page::<String>::last(Vec::new()))
        },
        |s: &String| s.as_str(),
    );

    let outcome = tokio::time::timeout(Duration::from_millis(20), never_answers).await;
    assert!(outcome.is_err());
}

#[tokio::test]
async fn test_decode_failure_surfaces_as_provider_error() {
    let api: InMemoryAccessApi = api(SMALL_PAGE);
    api.insert_raw(
        access_provider::api::RecordKind::Group,
        "g-broken",
        serde_json::json!({"id": "g-broken", "name": 42}),
    )
    .await;

    let err = assert_err!(listing::list_groups(&api, None).await);
    assert!(matches!(err, ProviderError::Api { operation: "list groups", .. }));
}
