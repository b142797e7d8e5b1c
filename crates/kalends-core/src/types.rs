//! Document and space references plus the small enums shared by every layer.
//!
//! References use the compact form `wiki:Space.Sub.Page`. The wiki prefix is
//! optional and a backslash escapes a literal `.`, `:` or `\` inside a name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Wiki assumed when a compact reference carries no `wiki:` prefix.
pub const DEFAULT_WIKI: &str = "wiki";

/// A space, possibly nested, inside a wiki.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceReference {
    pub wiki: String,
    pub spaces: Vec<String>,
}

impl SpaceReference {
    /// ## Summary
    /// Creates a space reference.
    ///
    /// ## Errors
    /// Returns `InvalidReference` if `spaces` is empty.
    pub fn new(wiki: impl Into<String>, spaces: Vec<String>) -> CoreResult<Self> {
        if spaces.is_empty() {
            return Err(CoreError::InvalidReference(
                "a space reference needs at least one space".to_string(),
            ));
        }
        Ok(Self {
            wiki: wiki.into(),
            spaces,
        })
    }

    /// Returns the enclosing space, or `None` for a top-level space.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.spaces.len() < 2 {
            return None;
        }
        Some(Self {
            wiki: self.wiki.clone(),
            spaces: self.spaces[..self.spaces.len() - 1].to_vec(),
        })
    }

    /// Returns `true` if `self` is nested (at any depth) below `ancestor`.
    ///
    /// A space is not below itself.
    #[must_use]
    pub fn is_strictly_below(&self, ancestor: &Self) -> bool {
        self.wiki == ancestor.wiki
            && self.spaces.len() > ancestor.spaces.len()
            && self.spaces.starts_with(&ancestor.spaces)
    }

    /// Returns `true` if `self` is a direct child space of `parent`.
    #[must_use]
    pub fn is_child_of(&self, parent: &Self) -> bool {
        self.spaces.len() == parent.spaces.len() + 1 && self.is_strictly_below(parent)
    }

    /// Returns the document reference of the given page inside this space.
    #[must_use]
    pub fn page(&self, name: impl Into<String>) -> DocumentReference {
        DocumentReference {
            wiki: self.wiki.clone(),
            spaces: self.spaces.clone(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SpaceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", escape(&self.wiki))?;
        write_segments(f, &self.spaces)
    }
}

/// A page inside a wiki.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentReference {
    pub wiki: String,
    pub spaces: Vec<String>,
    pub name: String,
}

impl DocumentReference {
    /// ## Summary
    /// Creates a document reference.
    ///
    /// ## Errors
    /// Returns `InvalidReference` if `spaces` is empty or `name` is blank.
    pub fn new(
        wiki: impl Into<String>,
        spaces: Vec<String>,
        name: impl Into<String>,
    ) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::InvalidReference(
                "a document reference needs a page name".to_string(),
            ));
        }
        let space = SpaceReference::new(wiki, spaces)?;
        Ok(space.page(name))
    }

    /// Returns the space holding this page.
    #[must_use]
    pub fn last_space(&self) -> SpaceReference {
        SpaceReference {
            wiki: self.wiki.clone(),
            spaces: self.spaces.clone(),
        }
    }

    /// Returns `true` if this page is the default page of its space.
    #[must_use]
    pub fn is_default_page(&self, default_page_name: &str) -> bool {
        self.name == default_page_name
    }

    /// ## Summary
    /// Returns the page expected to hold the calendar this event belongs to.
    ///
    /// For a non-terminal event page (`Cal.Event.WebHome`) this is the default page
    /// of the parent space (`Cal.WebHome`); for a terminal page (`Cal.Event`) it is
    /// the default page of its own space. Returns `None` when a non-terminal page
    /// sits in a top-level space.
    #[must_use]
    pub fn calendar_reference(&self, default_page_name: &str) -> Option<Self> {
        let calendar_space = if self.is_default_page(default_page_name) {
            self.last_space().parent()?
        } else {
            self.last_space()
        };
        Some(calendar_space.page(default_page_name))
    }

    /// Returns the slash separated path used for access policies, e.g. `/wiki/Cal/Event/WebHome`.
    #[must_use]
    pub fn resource_path(&self) -> String {
        let mut path = String::from("/");
        path.push_str(&self.wiki);
        for segment in self.spaces.iter().chain(std::iter::once(&self.name)) {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", escape(&self.wiki))?;
        write_segments(f, &self.spaces)?;
        write!(f, ".{}", escape(&self.name))
    }
}

impl FromStr for DocumentReference {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let (wiki, rest) = split_wiki(s);
        let mut segments = split_unescaped(rest, '.');
        if segments.len() < 2 {
            return Err(CoreError::InvalidReference(format!(
                "expected at least one space and a page name in [{s}]"
            )));
        }
        let name = segments.pop().unwrap_or_default();
        Self::new(wiki.unwrap_or_else(|| DEFAULT_WIKI.to_string()), segments, name)
    }
}

impl TryFrom<String> for DocumentReference {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl From<DocumentReference> for String {
    fn from(value: DocumentReference) -> Self {
        value.to_string()
    }
}

/// Where to look for events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationFilter {
    /// Every event of the store.
    #[default]
    Wiki,
    /// Events anywhere below the space of the given page.
    Space(DocumentReference),
    /// Events whose space is a direct child of the space of the given page.
    Page(DocumentReference),
}

impl LocationFilter {
    /// ## Summary
    /// Builds a filter from its name (`wiki`, `space`, `page`) and the parent page reference.
    ///
    /// Missing or unknown names fall back to `Wiki`.
    ///
    /// ## Errors
    /// Returns `InvalidReference` if `space` or `page` is requested without a valid parent.
    pub fn from_parts(filter: Option<&str>, parent: Option<&str>) -> CoreResult<Self> {
        let parent_ref = || -> CoreResult<DocumentReference> {
            parent
                .ok_or_else(|| {
                    CoreError::InvalidReference("location filter needs a parent page".to_string())
                })?
                .parse()
        };
        match filter {
            Some("space") => Ok(Self::Space(parent_ref()?)),
            Some("page") => Ok(Self::Page(parent_ref()?)),
            _ => Ok(Self::Wiki),
        }
    }

    /// Returns `true` if an event living in `event_space` passes this filter.
    #[must_use]
    pub fn accepts(&self, event_space: &SpaceReference) -> bool {
        match self {
            Self::Wiki => true,
            Self::Space(parent) => event_space.is_strictly_below(&parent.last_space()),
            Self::Page(parent) => event_space.is_child_of(&parent.last_space()),
        }
    }
}

/// Direction of the final instance sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    /// Applies the direction to an ascending comparison result.
    #[must_use]
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

fn split_wiki(s: &str) -> (Option<String>, &str) {
    let mut escaped = false;
    for (idx, c) in s.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            ':' if !escaped => return (Some(unescape(&s[..idx])), &s[idx + 1..]),
            '.' if !escaped => return (None, s),
            _ => escaped = false,
        }
    }
    (None, s)
}

fn split_unescaped(s: &str, separator: char) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for c in s.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    segments.push(current);
    segments
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;
    for c in s.chars() {
        if c == '\\' && !escaped {
            escaped = true;
        } else {
            out.push(c);
            escaped = false;
        }
    }
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '.' | ':' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn write_segments(f: &mut fmt::Formatter<'_>, segments: &[String]) -> fmt::Result {
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            f.write_str(".")?;
        }
        f.write_str(&escape(segment))?;
    }
    Ok(())
}
