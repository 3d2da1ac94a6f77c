//! Logging init: structured `tracing` output on stderr.
//!
//! Progress lines for humans go to stdout through [`crate::output`]; the
//! log carries diagnostics (skipped candidates, failed searches, overflowing
//! captions). `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Default filter: warnings only, or debug output for this crate when verbose.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "info,cf_meme=debug" } else { "warn" }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_enables_crate_debug() {
        assert_eq!(default_filter(false), "warn");
        assert!(default_filter(true).contains("cf_meme=debug"));
    }

    #[test]
    fn default_filters_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
        }
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
