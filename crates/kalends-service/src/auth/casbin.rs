use std::path::Path;

use casbin::{CoreApi, MgmtApi};
use string_adapter::StringAdapter;

use crate::error::ServiceResult;

/// ## Summary
/// Initialize a Casbin enforcer with the bundled model and the given policy text.
///
/// Policy lines use `p, <subject>, <path glob>, <role>`, `g, <user>, <group>`
/// and `g2, <role>, <action>`.
///
/// ## Errors
/// Returns an error if the model or the policies cannot be loaded.
#[tracing::instrument(skip(policies))]
pub async fn init_casbin(policies: &str) -> ServiceResult<casbin::Enforcer> {
    tracing::debug!("Initializing Casbin enforcer");

    let model = casbin::DefaultModel::from_str(include_str!("casbin_model.conf")).await?;
    tracing::debug!("Casbin model loaded");

    let adapter = StringAdapter::new(policies);
    let enforcer = casbin::Enforcer::new(model, adapter).await?;

    let policy_count = enforcer.get_policy().len();
    let grouping_count = enforcer.get_grouping_policy().len();
    tracing::info!(
        policy_count = policy_count,
        grouping_count = grouping_count,
        "Casbin enforcer initialized successfully"
    );
    Ok(enforcer)
}

/// ## Summary
/// Reads a policy file and initializes an enforcer from it.
///
/// ## Errors
/// Returns `PolicyIo` if the file cannot be read, or any error of `init_casbin`.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn init_casbin_from_file(path: impl AsRef<Path>) -> ServiceResult<casbin::Enforcer> {
    let policies = tokio::fs::read_to_string(path.as_ref()).await?;
    init_casbin(&policies).await
}
