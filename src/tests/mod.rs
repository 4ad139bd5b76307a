//! Cross-module test suite
//!
//! Unit tests live next to the code they cover; the groups here exercise the
//! compiler, ingestion and request handling together.

#[cfg(test)]
mod service_tests;
