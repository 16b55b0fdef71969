use log::error;
use std::panic;

/// Configures the panic hook to log the panic (so it lands in the configured
/// appenders rather than raw stderr) and then abort the process. A panicking
/// service must not keep the node half-alive.
pub fn configure_panic() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        error!("{}", panic_info);
        default_hook(panic_info);
        std::process::exit(1);
    }));
}
