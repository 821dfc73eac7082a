//! HTTP surface for the task service.
//!
//! A thin inbound adapter: request deserialisation, routing, and
//! error-to-status translation. All decision logic lives in the service
//! layer.

mod tasks;

pub use tasks::router;
