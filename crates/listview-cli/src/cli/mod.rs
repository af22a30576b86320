//! # CLI Behavior
//!
//! This is **one possible UI client** for listview. It is the only place that
//! knows about terminal I/O, exit codes and output formatting.
//!
//! ## Data Sources
//!
//! `--data` accepts either a single `<name>.json` file holding an array of
//! records, or a directory of `<entity>.json` files, in which case the page
//! config's `entity` picks the file. Deletes rewrite that file.
//!
//! ## Flags as Actions
//!
//! - `--search T` → `SetSearch`
//! - `--facet K=V` (repeatable) → one `SetFacet` per key with all its values
//! - `--sort FIELD[:desc]` → `SetSort`
//! - `--page N` → `GoToPage`
//! - `--select ID` (repeatable) → `ToggleSelect`
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` controls the
//! filter; `--verbose` forces `debug`.
//!
//! ## Module Structure
//!
//! - `commands`: Subcommand handlers that drive the controller
//! - `render`: Tables, facet lists and messages
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
