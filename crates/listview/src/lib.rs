//! # Listview Architecture
//!
//! Listview is a **UI-agnostic list-view state engine**. Every admin screen
//! that shows a table of records (parties, expenses, visits, products) needs
//! the same machinery: a search box, facet dropdowns, pagination, row
//! selection with select-all, bulk delete and export. This crate implements
//! that machinery once, over plain JSON records.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI / CLI (listview-cli, or any renderer)                   │
//! │  - Turns user input into Actions, renders ListView          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - ListController: owns items + state for one page          │
//! │  - Permission gating, optimistic delete, refetch            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State + Commands (state.rs, commands/, facets/)            │
//! │  - reduce(state, action) -> state                           │
//! │  - search → facets → sort → paginate, pure functions        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract EntityStore trait                               │
//! │  - JsonFileStore (CLI), InMemoryStore (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Derived, Never Stored
//!
//! The filtered list, the current page slice, the visible ids and the
//! "all selected" flag are recomputed from `(items, state, config)` on every
//! [`ListController::view`](api::ListController::view). Nothing derived is
//! cached, so there is nothing to invalidate.
//!
//! ## Key Principle: No I/O in the Core
//!
//! Below the API layer, code takes Rust values and returns Rust values. It
//! never writes to stdout, never exits, and never assumes a terminal.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`, `facets/*.rs`): unit tests of each step.
//! 2. **API** (`api.rs`): controller flows over [`store::memory::InMemoryStore`].
//! 3. **Properties** (`tests/`): `proptest` checks of the pipeline invariants.
//!
//! ## Module Overview
//!
//! - [`api`]: The controller facade
//! - [`state`]: View state and its reducer
//! - [`commands`]: Search, sort, pagination, selection, export, delete
//! - [`facets`]: Facet specifications, normalisation and filtering
//! - [`permissions`]: Permission oracle and list actions
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Entities, ids and query keys
//! - [`config`]: Application settings and page configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod facets;
pub mod model;
pub mod permissions;
pub mod state;
pub mod store;
