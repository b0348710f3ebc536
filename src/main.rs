//! Pricewise
//!
//! Loads a fixture set, optionally adds search results to its cart and prints
//! the cost of the cart at every store, cheapest first.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to search the fixture offers and add the matches to the cart
//! Use `-d` to list the confirmed catalogue lines for one store

use std::{io, io::Write, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pricewise::{fixtures::Fixture, offers::search_or_empty, utils::CompareArgs};

/// Cart comparison
pub fn main() -> Result<()> {
    let args = CompareArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut fixture = Fixture::from_set_in(&args.fixtures_dir, &args.fixture)?;

    info!(
        fixture = %args.fixture,
        stores = fixture.stores().len(),
        lines = fixture.cart().len(),
        "loaded fixture set"
    );

    for query in &args.search {
        let offers = search_or_empty(fixture.offers(), query);

        if offers.is_empty() {
            warn!(query = %query, "no offers matched");
        }

        for offer in offers {
            fixture.cart_mut().add_item(offer)?;
        }
    }

    info!(
        lines = fixture.cart().len(),
        items = fixture.cart().item_count(),
        subtotal = %fixture.cart().subtotal()?,
        "cart ready"
    );

    let start = Instant::now();
    let comparison = fixture.comparison()?;
    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    comparison.write_to(&mut handle)?;

    if let Some(store_id) = args.detail.as_deref() {
        writeln!(handle)?;
        comparison.write_store_detail(&mut handle, store_id)?;
    }

    writeln!(
        handle,
        "\n {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}
