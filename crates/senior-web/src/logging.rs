//! Console logging
//!
//! `tracing` events from both crates are routed to the browser console by
//! `tracing-wasm`. Installing the subscriber twice is harmless.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the panic hook and the console subscriber.
pub fn init_logging() {
    INIT.call_once(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(tracing::Level::DEBUG)
                .build(),
        );
    });
}

/// Whether the page is served from a development host.
pub fn is_development(hostname: &str) -> bool {
    hostname == "localhost"
}
