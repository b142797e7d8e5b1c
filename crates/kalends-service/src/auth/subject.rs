//! Subject types for authorization.
//!
//! A subject represents a principal (user, group) or special pseudo-principals.
//! The authorization system expands an identity into its user subject, all its
//! group memberships, and the pseudo-principals (authenticated, unauthenticated, all).

use std::fmt;

/// The party a query runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    /// Anonymous access.
    #[default]
    Guest,
    /// A logged-in user with their group memberships.
    User { name: String, groups: Vec<String> },
}

impl Identity {
    /// A user without group memberships.
    #[must_use]
    pub fn user(name: impl Into<String>) -> Self {
        Self::User {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Adds group memberships; no effect on a guest.
    #[must_use]
    pub fn with_groups(self, extra: impl IntoIterator<Item = impl Into<String>>) -> Self {
        match self {
            Self::Guest => Self::Guest,
            Self::User { name, mut groups } => {
                groups.extend(extra.into_iter().map(Into::into));
                Self::User { name, groups }
            }
        }
    }

    /// Expands this identity into every subject that may grant it a right.
    #[must_use]
    pub fn expand(&self) -> ExpandedSubjects {
        match self {
            Self::Guest => ExpandedSubjects::unauthenticated_only(),
            Self::User { name, groups } => ExpandedSubjects::new(name, groups),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guest => f.write_str("guest"),
            Self::User { name, .. } => f.write_str(name),
        }
    }
}

/// A subject for authorization checks.
///
/// In Casbin terms, this is the `sub` parameter in enforcement requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    User(String),
    Group(String),
    /// Anonymous callers only.
    Unauthenticated,
    /// Any logged-in user.
    Authenticated,
    /// Everyone.
    All,
}

impl Subject {
    /// Returns the Casbin subject string.
    #[must_use]
    pub fn casbin_subject(&self) -> String {
        match self {
            Self::User(name) => format!("user:{name}"),
            Self::Group(name) => format!("group:{name}"),
            Self::Unauthenticated => "unauthenticated".to_string(),
            Self::Authenticated => "authenticated".to_string(),
            Self::All => "all".to_string(),
        }
    }

    /// Parse a Casbin subject string.
    #[must_use]
    pub fn from_casbin_subject(s: &str) -> Option<Self> {
        match s {
            "unauthenticated" => Some(Self::Unauthenticated),
            "authenticated" => Some(Self::Authenticated),
            "all" => Some(Self::All),
            _ => {
                if let Some(name) = s.strip_prefix("user:") {
                    Some(Self::User(name.to_string()))
                } else {
                    s.strip_prefix("group:")
                        .map(|name| Self::Group(name.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.casbin_subject())
    }
}

/// An expanded set of subjects for authorization.
///
/// For a user this is the user, their groups, `authenticated` and `all`.
/// For a guest it is `unauthenticated` and `all`.
///
/// Access is granted if ANY of these subjects has the required permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedSubjects {
    subjects: Vec<Subject>,
}

impl ExpandedSubjects {
    #[must_use]
    pub fn new(user: &str, groups: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let mut subjects = vec![Subject::User(user.to_string())];
        subjects.extend(
            groups
                .into_iter()
                .map(|group| Subject::Group(group.as_ref().to_string())),
        );
        subjects.push(Subject::Authenticated);
        subjects.push(Subject::All);

        Self { subjects }
    }

    /// Create an expanded subject set for anonymous access only.
    #[must_use]
    pub fn unauthenticated_only() -> Self {
        Self {
            subjects: vec![Subject::Unauthenticated, Subject::All],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    /// Returns all Casbin subject strings.
    #[must_use]
    pub fn casbin_subjects(&self) -> Vec<String> {
        self.subjects.iter().map(Subject::casbin_subject).collect()
    }

    #[must_use]
    pub fn contains(&self, subject: &Subject) -> bool {
        self.subjects.contains(subject)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExpandedSubjects {
    type Item = &'a Subject;
    type IntoIter = std::slice::Iter<'a, Subject>;

    fn into_iter(self) -> Self::IntoIter {
        self.subjects.iter()
    }
}
