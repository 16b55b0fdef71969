use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Shutdown {
    fn shutdown(self: &Arc<Self>);
}

/// Routes ctrl-c into a graceful core shutdown. A second signal halts the
/// process immediately.
pub struct Signals<T: Shutdown + Send + Sync + 'static> {
    target: Arc<T>,
    iterations: AtomicU64,
}

impl<T: Shutdown + Send + Sync + 'static> Signals<T> {
    pub fn new(target: Arc<T>) -> Signals<T> {
        Signals { target, iterations: AtomicU64::new(0) }
    }

    pub fn init(self: &Arc<Self>) {
        let signals = self.clone();
        ctrlc::set_handler(move || {
            let v = signals.iterations.fetch_add(1, Ordering::SeqCst);
            if v > 0 {
                println!("^SIGNAL - halting");
                std::process::exit(1);
            }

            println!("^SIGNAL - shutting down... (CTRL+C again to halt)");
            signals.target.shutdown();
        })
        .expect("Error setting signal handler");
    }
}
