//=====================================================
// File: logging.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Tracing setup for the ArcanaScript runner
// Objective: Install one stderr subscriber so revealed output on stdout stays clean
//=====================================================

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

const QUIET: &str = "arcanascript=warn";
const VERBOSE: &str = "arcanascript=debug";

/// Idempotent. `RUST_LOG` wins over the verbosity flag when set.
pub fn init(verbose: bool) {
    INIT.get_or_init(|| {
        let fallback = if verbose { VERBOSE } else { QUIET };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
            .try_init();
    });
}

//=====================================================
// End of file
//=====================================================
