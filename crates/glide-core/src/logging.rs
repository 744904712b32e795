#![forbid(unsafe_code)]

//! Logging support.
//!
//! With the `tracing` feature the tracing macros are re-exported here (and at
//! the crate root) so downstream crates log through one path. The
//! `tracing-json` feature adds [`init_json_logging`], which installs a JSON
//! subscriber filtered by `RUST_LOG` or the given default directive.
//!
//! Targets used across glide:
//!
//! | Target           | Emitted by                          |
//! |------------------|-------------------------------------|
//! | `glide.router`   | registration, hooks, event routing  |
//! | `glide.frame`    | per-frame active-set processing     |
//! | `glide.settings` | settings installation and changes   |

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

/// Target for registration, hook, and routing events.
pub const TARGET_ROUTER: &str = "glide.router";

/// Target for per-frame processing.
pub const TARGET_FRAME: &str = "glide.frame";

/// Target for settings changes.
pub const TARGET_SETTINGS: &str = "glide.settings";

/// Install a global JSON subscriber.
///
/// `default_directive` (e.g. `"glide=debug"`) applies when `RUST_LOG` is not
/// set. Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(default_directive: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
