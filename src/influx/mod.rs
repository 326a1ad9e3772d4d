//! Metric points and their path into InfluxDB
//!
//! - [`point`] - the point model
//! - [`mapper`] - NSX objects to points
//! - [`line_protocol`] - text encoding
//! - [`writer`] - batch writes over HTTP

pub mod line_protocol;
pub mod mapper;
pub mod point;
pub mod writer;

pub use point::{FieldValue, Measurement, MetricPoint};
pub use writer::{InfluxWriter, PointWriter, WriteError};
