use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use kalends_core::types::{DocumentReference, LocationFilter, SortOrder};
use kalends_service::auth::{AccessFilter, Identity};
use kalends_service::{CalendarService, EventQuery};
use kalends_store::EventStore;
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "kalends")]
#[command(about = "Compute calendar event occurrences from a document store")]
pub struct Cli {
    /// User to run as (defaults to `access.default_user`, then to a guest)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Group the user belongs to; may be repeated
    #[arg(short, long = "group", global = true)]
    pub groups: Vec<String>,

    /// JSON fixture to load instead of `store.fixture`
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the event instances of a range of days
    Events {
        /// First day (e.g. "2024-01-01")
        #[arg(long)]
        from: NaiveDate,

        /// Last day; the query covers a single day when omitted
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Location filter: wiki, space or page
        #[arg(long, default_value = "wiki")]
        filter: String,

        /// Page whose space the location filter applies to
        #[arg(long)]
        parent: Option<String>,

        /// Calendar page to restrict the query to; may be repeated
        #[arg(long = "calendar")]
        calendars: Vec<String>,

        /// Sort by descending start
        #[arg(long)]
        descending: bool,
    },
    /// List calendars
    Calendars {
        /// Only calendars the user may edit
        #[arg(long)]
        editable: bool,
    },
    /// Resolve a single occurrence of an event
    Instance {
        /// Event page, e.g. "Team.Standup.WebHome"
        reference: String,

        /// Unmodified start of the occurrence (e.g. "2024-01-15T09:00:00Z")
        #[arg(long)]
        original_start: Option<DateTime<Utc>>,

        /// Print an unsaved modification prefilled for editing instead
        #[arg(long)]
        template: bool,
    },
    /// Print the position of the modification keyed at an original start
    ModificationIndex {
        reference: String,
        original_start: DateTime<Utc>,
    },
}

impl Cli {
    /// Identity from the command line, falling back to `default_user`.
    #[must_use]
    pub fn identity(&self, default_user: Option<&str>) -> Identity {
        match self.user.as_deref().or(default_user) {
            Some(name) => Identity::user(name).with_groups(self.groups.iter().cloned()),
            None => Identity::Guest,
        }
    }
}

impl Command {
    /// ## Summary
    /// Runs the command and returns its JSON output.
    ///
    /// ## Errors
    /// Returns an error for malformed references or when a single-event
    /// operation fails.
    pub fn run<S: EventStore, A: AccessFilter>(
        &self,
        service: &CalendarService<S, A>,
        identity: &Identity,
    ) -> Result<Value> {
        match self {
            Self::Events {
                from,
                to,
                filter,
                parent,
                calendars,
                descending,
            } => {
                let mut query = EventQuery::new(*from)
                    .with_location(LocationFilter::from_parts(
                        Some(filter.as_str()),
                        parent.as_deref(),
                    )?)
                    .with_calendars(parse_references(calendars)?)
                    .with_order(SortOrder::from_ascending(!descending));
                if let Some(to) = to {
                    query = query.until(*to);
                }
                Ok(serde_json::to_value(service.query_events(identity, &query))?)
            }
            Self::Calendars { editable } => {
                let calendars = if *editable {
                    service.all_editable_calendars(identity)
                } else {
                    service.all_calendars(identity)
                };
                Ok(serde_json::to_value(calendars)?)
            }
            Self::Instance {
                reference,
                original_start,
                template,
            } => {
                let reference: DocumentReference = reference.parse()?;
                if *template {
                    Ok(serde_json::to_value(
                        service.modification_template(&reference, *original_start)?,
                    )?)
                } else {
                    Ok(serde_json::to_value(
                        service.event_instance(&reference, *original_start)?,
                    )?)
                }
            }
            Self::ModificationIndex {
                reference,
                original_start,
            } => {
                let reference: DocumentReference = reference.parse()?;
                Ok(serde_json::to_value(
                    service.find_modification_index(&reference, *original_start)?,
                )?)
            }
        }
    }
}

fn parse_references(references: &[String]) -> Result<Vec<DocumentReference>> {
    Ok(references
        .iter()
        .map(|reference| reference.parse::<DocumentReference>())
        .collect::<Result<Vec<_>, _>>()?)
}
