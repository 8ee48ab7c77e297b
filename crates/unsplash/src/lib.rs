//! Unsplash catalog client.
//!
//! Implements [`photopack_core::provider::CatalogClient`] and
//! [`photopack_core::provider::ImageSource`] over the Unsplash REST API
//! using [`reqwest`].

pub mod client;
pub mod models;

pub use client::{Timeouts, UnsplashClient, UnsplashConfig, DEFAULT_API_URL};
