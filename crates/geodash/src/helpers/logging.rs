/// Installs the fmt subscriber once. Honors `RUST_LOG`, defaulting to
/// `geodash=info`.
#[cfg(not(wasm))]
pub fn init_logging() {
    use std::sync::Once;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("geodash=info"));
        let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

        #[cfg(feature = "profile-tracy")]
        let registry = registry.with(tracing_tracy::TracyLayer::default());

        if registry.try_init().is_err() {
            log::warn!("a global tracing subscriber was already installed");
        }
    });
}

// The browser host forwards `log` records through console_log instead.
#[cfg(wasm)]
pub fn init_logging() {}

#[cfg(all(feature = "profile-tracy", not(wasm)))]
pub fn init_profiling() {
    let _ = tracy_client::Client::start();
    tracy_client::set_thread_name!("geodash-main");
    // first frame boundary
    tracy_client::frame_mark();
}

#[cfg(not(all(feature = "profile-tracy", not(wasm))))]
pub fn init_profiling() {}

/// Marks a frame boundary for the profiler, if one is attached.
#[inline]
pub fn frame_mark() {
    #[cfg(all(feature = "profile-tracy", not(wasm)))]
    tracy_client::frame_mark();
}
