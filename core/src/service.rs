use crate::core::Core;
use std::sync::Arc;
use std::thread::JoinHandle;

/// A thread-backed process service. Implementors spawn their worker threads in
/// `start` and return the join handles; `stop` must signal the workers to exit.
pub trait Service: Sync + Send {
    fn ident(self: Arc<Self>) -> &'static str;
    fn start(self: Arc<Self>, core: Arc<Core>) -> Vec<JoinHandle<()>>;
    fn stop(self: Arc<Self>);
}
