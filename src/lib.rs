//! Terminal CRUD exercises built around a debounced lookup pipeline
//!
//! Each screen is either a lookup form, where typing feeds a
//! [`pipeline::QueryPipeline`] that checks availability or searches a
//! document in the background, or a record table with add, edit and delete
//! popups over a [`store::DocumentStore`].

pub mod app;
pub mod config;
pub mod error;
pub mod lookup;
pub mod notification;
pub mod pipeline;
pub mod records;
pub mod store;
pub mod widgets;

#[cfg(test)]
mod test_utils;
