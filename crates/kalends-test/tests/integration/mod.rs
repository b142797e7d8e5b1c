//! Integration tests for calendar queries.
//!
//! Every test builds its own in-memory store from the shared fixtures in
//! `kalends_test::fixtures`, so tests run in parallel without shared state.

mod access;
mod event_instance;
mod expand;
mod fixture_file;
mod helpers;
mod query;
