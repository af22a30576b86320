//! # Command Layer
//!
//! The core logic of a list page. Each operation lives in its own submodule as
//! plain functions over [`Entity`](crate::model::Entity) slices and state
//! values.
//!
//! ## Role and Responsibilities
//!
//! - Narrow a collection by search term and facets
//! - Sort, paginate, and track selection
//! - Shape exports and facet dropdown options
//! - Perform deletes with local rollback
//!
//! Apart from [`delete`], which talks to an
//! [`EntityStore`](crate::store::EntityStore), commands are pure: the same
//! inputs always give the same output, and nothing here renders, prompts, or
//! decides on permissions. That belongs to [`crate::api`] and the UI.
//!
//! ## Pipeline
//!
//! ```text
//! items ──search──▶ facets ──sort──▶ filtered ──paginate──▶ page
//!                                        │
//!                                        └── export / select-all scope
//! ```
//!
//! [`view::run`] runs the whole pipeline for one render.
//!
//! ## Testing Strategy
//!
//! Most tests live here, next to each command, using inline JSON entities and
//! the in-memory store fixtures.
//!
//! ## Command Modules
//!
//! - [`search`]: Case-insensitive substring search and highlighting
//! - [`paginate`]: Page slicing and page counts
//! - [`selection`]: Selected-id set and select-all toggling
//! - [`sort`]: Stable typed sorting
//! - [`view`]: The full pipeline projection
//! - [`options`]: Distinct facet values for dropdowns
//! - [`export`]: Tabular export shaping
//! - [`delete`]: Optimistic delete with rollback

pub mod delete;
pub mod export;
pub mod options;
pub mod paginate;
pub mod search;
pub mod selection;
pub mod sort;
pub mod view;
