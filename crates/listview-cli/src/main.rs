//! # Listview CLI
//!
//! A terminal client for the `listview` engine. The binary is thin: argument
//! parsing, dispatch and rendering live in `src/cli/`, and this file only
//! invokes `cli::run()` and maps failure to an exit code.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/listview-cli/src/cli/)                   │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Flags → Actions, controller wiring (commands.rs)         │
//! │  - Terminal tables and JSON output (render.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/listview/src/api.rs)                     │
//! │  - ListController over a JsonFileStore                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each invocation is one "render": the collection is loaded, the flags are
//! replayed as actions against a fresh state, and the resulting view is
//! printed.
//!
//! ## Testing Approach
//!
//! - Argument parsing and rendering: unit tests next to the code.
//! - End to end: `tests/cli_e2e.rs` runs the binary against temp files.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
