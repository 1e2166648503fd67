pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "budget_tracker=warn";

/// Installs the global subscriber once. `RUST_LOG` overrides the default
/// directive; output goes to stderr so it never interleaves with menus.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = match DEFAULT_DIRECTIVE.parse::<Directive>() {
            Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
            Err(_) => EnvFilter::from_default_env(),
        };
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
