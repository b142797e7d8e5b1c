//! Authorization checks on documents.
//!
//! Wraps Casbin enforcement: the request object is the slash separated
//! resource path of a document, matched by glob against policy paths, and
//! roles map to actions through `g2`.

use std::sync::Arc;

use casbin::CoreApi;
use kalends_core::types::DocumentReference;

use crate::error::ServiceResult;

use super::{action::Action, subject::ExpandedSubjects};

/// Result of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthzResult {
    Allowed,
    Denied,
}

impl AuthzResult {
    /// Returns `true` if access is allowed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Authorization service for checking permissions on documents.
pub struct Authorizer {
    enforcer: Arc<casbin::Enforcer>,
}

impl Authorizer {
    /// Create a new authorizer with the given Casbin enforcer.
    #[must_use]
    pub fn new(enforcer: Arc<casbin::Enforcer>) -> Self {
        Self { enforcer }
    }

    /// Check if any subject in the expanded set has the required permission.
    ///
    /// ## Errors
    ///
    /// Returns `CasbinError` if Casbin evaluation fails.
    pub fn check(
        &self,
        subjects: &ExpandedSubjects,
        reference: &DocumentReference,
        action: Action,
    ) -> ServiceResult<AuthzResult> {
        let path = reference.resource_path();
        let act = action.as_casbin_action();

        tracing::debug!(
            path = %path,
            action = %act,
            subject_count = subjects.len(),
            "Authorization check started"
        );

        for subject in subjects {
            let sub = subject.casbin_subject();
            let allowed = self.enforcer.enforce((&sub, &path, act))?;

            tracing::trace!(
                subject = %sub,
                path = %path,
                action = %act,
                allowed = %allowed,
                "Subject check result"
            );

            if allowed {
                tracing::debug!(
                    subject = %sub,
                    path = %path,
                    action = %act,
                    "Authorization granted"
                );
                return Ok(AuthzResult::Allowed);
            }
        }

        tracing::debug!(
            path = %path,
            action = %act,
            "Authorization denied for all subjects"
        );
        Ok(AuthzResult::Denied)
    }
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer").finish_non_exhaustive()
    }
}
