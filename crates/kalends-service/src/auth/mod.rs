//! Access control over event and calendar documents.
//!
//! ## Module Organization
//!
//! - `action`: Authorization actions for Casbin enforcement (view, edit)
//! - `subject`: Identities, subjects and their expansion into pseudo-principals
//! - `casbin`: Casbin enforcer initialization from policy text or files
//! - `service`: Per-document authorization checks (`Authorizer`)
//! - `access`: The `AccessFilter` capability consumed by the calendar service

pub mod access;
pub mod action;
pub mod casbin;
pub mod service;
pub mod subject;


pub use access::{AccessFilter, AllowAll, CasbinAccessFilter};
pub use action::Action;
pub use self::casbin::{init_casbin, init_casbin_from_file};
pub use service::{Authorizer, AuthzResult};
pub use subject::{ExpandedSubjects, Identity, Subject};
