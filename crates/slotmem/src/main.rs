//! `slotmem` demo binary.
//!
//! Fills a 256-slot region with random blocks, prints the slot grid,
//! frees half the blocks at random, compacts, and prints the grid again.
//! Diagnostics go to stderr and are filtered by `RUST_LOG`.

use std::process::ExitCode;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slotmem::demo::{self, DEMO_SEED};
use slotmem::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    init_tracing();

    let mut rng = ChaCha8Rng::seed_from_u64(DEMO_SEED);
    match demo::run(SlotConfig::default(), &mut rng) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "demo failed");
            eprintln!("slotmem: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
