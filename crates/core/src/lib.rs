//! Photopack domain logic.
//!
//! Catalog search entry point, selection archiving, the archive container
//! writer, and the naming rules shared by both. Network access is kept
//! behind the traits in [`provider`] so everything here runs without a
//! remote catalog.

pub mod archive;
pub mod archiver;
pub mod catalog;
pub mod error;
pub mod naming;
pub mod photo;
pub mod provider;
pub mod slug;
