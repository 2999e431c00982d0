//! # House-Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks
//! └── src/integration/  # Cross-crate flows
//!     ├── renting_flow.rs
//!     ├── listing.rs
//!     ├── recovery.rs
//!     └── persistence.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hl-tests
//! cargo test -p hl-tests integration::recovery
//! cargo bench -p hl-tests
//! ```

#![allow(dead_code)]

pub mod integration;
