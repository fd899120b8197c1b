pub mod domain;
pub mod shared;

/// Host-app logging init: call once before mounting.
pub fn init_log() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
