//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the cart comparison binary
#[derive(Debug, Parser)]
#[command(name = "pricewise", about = "Compare a grocery cart across stores")]
pub struct CompareArgs {
    /// Fixture set to load stores, catalogue, offers & cart from
    #[clap(short, long, env = "PRICEWISE_FIXTURE", default_value = "demo")]
    pub fixture: String,

    /// Directory containing the fixture sets
    #[clap(long, env = "PRICEWISE_FIXTURES_DIR", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Search the fixture offers and add every match to the cart (repeatable)
    #[clap(short, long)]
    pub search: Vec<String>,

    /// Show the confirmed catalogue lines for a store id
    #[clap(short, long)]
    pub detail: Option<String>,

    /// Log level used when `RUST_LOG` isn't set
    #[clap(long, default_value = "info")]
    pub log_level: String,
}
