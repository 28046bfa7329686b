//! Binary entry point that glues the SQLite-backed registry to the
//! line-oriented front-end: bring up the database once so first-run schema
//! problems surface immediately, then hand control to the prompt loop.
use person_registry::{cli, open_registry};

/// Initialize persistence and run the prompt loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for
/// example an unwritable home directory) to the terminal instead of
/// crashing silently. Everything after bootstrap is recoverable and handled
/// inside the loop.
fn main() -> anyhow::Result<()> {
    open_registry()?;
    cli::run()
}
