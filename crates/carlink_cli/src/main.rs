//! `carlink` demo entry point.
//!
//! # Responsibility
//! - Reset the default store, save one linked user/car pair, then print both
//!   tables from fresh connections.
//! - Any failure ends the run with the propagated error.

use carlink_core::{core_version, default_log_level, init_logging, RelationshipStore, StoreConfig};
use log::info;
use std::error::Error;
use std::io::Write;

fn main() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::current_dir()?.join("logs");
    init_logging(default_log_level(), &log_dir.to_string_lossy())?;

    let store = RelationshipStore::new(StoreConfig::default());
    let stdout = std::io::stdout();
    run(&store, &mut stdout.lock())
}

/// Runs reset → create → list, writing the listing lines to `out`.
fn run(store: &RelationshipStore, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    info!(
        "event=cli_run module=cli status=start version={} database={}",
        core_version(),
        store.config().database_path.display()
    );

    store.reset_schema()?;
    writeln!(out, "The database has been reset.")?;

    store.create_linked_pair("John Doe", "Tesla", "3")?;

    for user in store.list_users()? {
        writeln!(out, "{user}")?;
    }
    for car in store.list_cars()? {
        writeln!(out, "{car}")?;
    }

    info!("event=cli_run module=cli status=ok");
    Ok(())
}
