//! HTTP request handlers
//!
//! Handlers are thin: they pick the operation, call the service and hand the
//! result to the response formatter.

pub mod channels;
pub mod health;
pub mod nowplaying;
