//! HTTP surface of the relay

pub mod handlers;
