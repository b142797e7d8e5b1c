//! Authorization actions for Casbin enforcement.

use std::fmt;

/// Actions that can be performed on documents.
///
/// These are used as the `act` parameter in Casbin enforcement requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// See the document and the events it defines.
    View,
    /// Change the document, including adding occurrence modifications.
    Edit,
}

impl Action {
    /// Returns the Casbin action string for this action.
    #[must_use]
    pub const fn as_casbin_action(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }

    /// Parse a Casbin action string into an action.
    #[must_use]
    pub fn from_casbin_action(action: &str) -> Option<Self> {
        match action {
            "view" => Some(Self::View),
            "edit" => Some(Self::Edit),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_casbin_action())
    }
}
