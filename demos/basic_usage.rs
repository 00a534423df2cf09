//! Basic Provider Usage Example
//!
//! Configures the provider against the in-memory API, manages a few objects
//! through their lifecycle handlers and reads them back through data sources.
//!
//! Run with `RUST_LOG=debug` to see page fetches.

use access_provider::api::InMemoryAccessApi;
use access_provider::data_sources::IntegrationsQuery;
use access_provider::resources::ManagedResource;
use access_provider::state::{
    AccessFlowModel, AccessScopeModel, AccessTarget, ApprovalMode, ApproverPolicy, BundleModel,
    Grantee, GroupModel, IntegrationModel,
};
use access_provider::{AccessProvider, ProviderConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    // Environment first, then fill in what a demo needs.
    let mut config = ProviderConfig::from_env()?;
    if config.token.is_empty() {
        config = config.with_token("demo-token");
    }
    println!("Using {:?}", config);

    let api = InMemoryAccessApi::new().with_page_size(config.page_size.min(3));
    for (email, first, last) in [
        ("jane@example.com", "Jane", "Doe"),
        ("omar@example.com", "Omar", "Haddad"),
        ("li@example.com", "Li", "Wei"),
    ] {
        api.add_user(email, Some(first), Some(last)).await;
    }

    let provider = AccessProvider::configure(config, api)?;
    println!(
        "Resources: {:?}\nData sources: {:?}",
        AccessProvider::<InMemoryAccessApi>::resource_types(),
        AccessProvider::<InMemoryAccessApi>::data_source_types()
    );

    let oncall = provider
        .groups()
        .create(&GroupModel::planned(
            "db-oncall",
            vec!["omar@example.com".to_string(), "jane@example.com".to_string()],
        ))
        .await?;
    println!("Created group {} with members {:?}", oncall.id, oncall.members);

    let mut db = IntegrationModel::planned("prod-postgres", "postgresql");
    db.connected_resource_types = vec!["postgresql-database".to_string()];
    db.user_cleanup_period_in_days = Some(30);
    let db = provider.integrations().create(&db).await?;

    let scope = provider
        .access_scopes()
        .create(&AccessScopeModel::planned(
            "prod tables",
            "resource_type = 'postgresql-table'",
        ))
        .await?;

    let bundle = provider
        .bundles()
        .create(&BundleModel::planned(
            "prod db readers",
            vec![
                AccessTarget::integration(&db.id, "postgresql-database", vec!["read".to_string()]),
                AccessTarget::access_scope(&scope.id),
            ],
        ))
        .await?;

    let mut flow = AccessFlowModel::planned(
        "on-call db access",
        vec![Grantee::group(&oncall.id)],
        vec![AccessTarget::bundle(&bundle.id)],
    );
    flow.approver_policy = Some(ApproverPolicy {
        mode: ApprovalMode::AnyOf,
        approvers: vec![Grantee::user("u-lead")],
    });
    flow.grant_duration_in_min = Some(240);
    let flow = provider.access_flows().create(&flow).await?;
    println!("Created access flow {} ({})", flow.name, flow.trigger);

    // Drop the approval step; the update sends an explicit null.
    let mut relaxed = flow.clone();
    relaxed.approver_policy = None;
    let relaxed = provider.access_flows().update(&flow.id, &relaxed).await?;
    println!("Approver policy after update: {:?}", relaxed.approver_policy);

    let groups = provider.groups_data_source().read(None).await?;
    println!("Groups: {:?}", groups);

    let members = provider.groups_data_source().members(&oncall.id).await?;
    for member in &members {
        println!("  {} <{}>", member.name, member.email);
    }

    let postgres = provider
        .integrations_data_source()
        .read(&IntegrationsQuery::default().with_type("postgresql"))
        .await?;
    println!("PostgreSQL integrations: {}", postgres.len());

    provider.access_flows().delete(&flow.id).await?;
    let gone = provider.access_flows().read(&flow.id).await?;
    println!("Access flow after delete: {:?}", gone);

    Ok(())
}
