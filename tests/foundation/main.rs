//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, the numeric tower, radix parsing, and Error.

mod error_reports;
mod literals;
mod numeric_tower;
