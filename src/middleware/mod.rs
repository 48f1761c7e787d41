//! Middleware module
//!
//! Request-scoped logging applied to every route

pub mod logging;

pub use logging::request_logging;
