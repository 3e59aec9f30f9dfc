//! Integration tests for Layer 1: Storage
//!
//! Tests for cells, the address space, the dictionary, and stacks.

mod address_space;
mod dictionary;
mod stacks;
