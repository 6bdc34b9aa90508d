//! The data model: shared vocabulary types, stored records, API shapes,
//! and the backing store.

pub mod api;
pub mod common;
pub mod db;
pub mod store;
