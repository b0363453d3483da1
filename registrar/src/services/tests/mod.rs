//! Tests for registrar services against a local mock of Zoom
//!
//! Every test starts its own wiremock server so they can run in parallel.
