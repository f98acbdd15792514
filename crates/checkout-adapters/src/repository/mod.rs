//! # Repository Module
//!
//! In-memory implementations of the checkout-core ports.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  OrderService                                                           │
//! │       │                                                                 │
//! │       │  products.find_by_id("COKE-330")                                │
//! │       │  inventory.reserve("COKE-330", 3)                               │
//! │       ▼                                                                 │
//! │  InMemoryCatalog / InMemoryInventory                                    │
//! │  ├── HashMap behind an RwLock                                           │
//! │  └── seeded from checkout.toml or by the caller                        │
//! │                                                                         │
//! │  Swapping these for a database-backed store touches no pricing code.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InMemoryCatalog`] - Product lookup
//! - [`InMemoryInventory`] - Stock ledger with check-and-reserve

pub mod catalog;
pub mod inventory;

pub use catalog::InMemoryCatalog;
pub use inventory::InMemoryInventory;
