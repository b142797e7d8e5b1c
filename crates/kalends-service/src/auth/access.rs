use kalends_core::types::DocumentReference;

use super::action::Action;
use super::service::Authorizer;
use super::subject::Identity;

/// Decides which documents an identity may see or change.
pub trait AccessFilter: Send + Sync {
    fn can_view(&self, identity: &Identity, reference: &DocumentReference) -> bool;

    fn can_edit(&self, identity: &Identity, reference: &DocumentReference) -> bool;

    /// Keeps the references `identity` may view, preserving their order.
    fn viewable(
        &self,
        identity: &Identity,
        references: Vec<DocumentReference>,
    ) -> Vec<DocumentReference> {
        references
            .into_iter()
            .filter(|reference| self.can_view(identity, reference))
            .collect()
    }

    /// Keeps the references `identity` may edit, preserving their order.
    fn editable(
        &self,
        identity: &Identity,
        references: Vec<DocumentReference>,
    ) -> Vec<DocumentReference> {
        references
            .into_iter()
            .filter(|reference| self.can_edit(identity, reference))
            .collect()
    }
}

impl<T: AccessFilter + ?Sized> AccessFilter for Box<T> {
    fn can_view(&self, identity: &Identity, reference: &DocumentReference) -> bool {
        (**self).can_view(identity, reference)
    }

    fn can_edit(&self, identity: &Identity, reference: &DocumentReference) -> bool {
        (**self).can_edit(identity, reference)
    }
}

/// Grants every right to everyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessFilter for AllowAll {
    fn can_view(&self, _identity: &Identity, _reference: &DocumentReference) -> bool {
        true
    }

    fn can_edit(&self, _identity: &Identity, _reference: &DocumentReference) -> bool {
        true
    }
}

/// Access filter evaluating Casbin policies. Evaluation errors deny access.
#[derive(Debug)]
pub struct CasbinAccessFilter {
    authorizer: Authorizer,
}

impl CasbinAccessFilter {
    #[must_use]
    pub const fn new(authorizer: Authorizer) -> Self {
        Self { authorizer }
    }

    fn allowed(&self, identity: &Identity, reference: &DocumentReference, action: Action) -> bool {
        match self
            .authorizer
            .check(&identity.expand(), reference, action)
        {
            Ok(result) => result.is_allowed(),
            Err(err) => {
                tracing::warn!(
                    identity = %identity,
                    reference = %reference,
                    action = %action,
                    error = %err,
                    "Authorization check failed, denying access"
                );
                false
            }
        }
    }
}

impl AccessFilter for CasbinAccessFilter {
    fn can_view(&self, identity: &Identity, reference: &DocumentReference) -> bool {
        self.allowed(identity, reference, Action::View)
    }

    fn can_edit(&self, identity: &Identity, reference: &DocumentReference) -> bool {
        self.allowed(identity, reference, Action::Edit)
    }
}
