//! NSX Manager API access
//!
//! - [`api`] - the [`NsxApi`] trait the collector consumes
//! - [`client`] - HTTPS implementation with cursor pagination
//! - [`models`] - typed responses
//! - [`error`] - transport and decode errors

pub mod api;
pub mod client;
pub mod error;
pub mod models;

pub use api::{ApiResult, NsxApi};
pub use client::NsxClient;
pub use error::ApiError;
