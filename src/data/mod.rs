//! Data layer: core types, loading, and splitting.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  model   │  Table::split_off → features (X) + target Column (y)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  split   │  seeded stratified shuffle → x_train, x_test, y_train, y_test
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod split;
