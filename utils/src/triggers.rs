use triggered::{Listener, Trigger, trigger};

/// A once-only shutdown signal. The trigger side is cloned into the task that
/// decides to stop, the listener side into every loop that must observe it.
#[derive(Clone)]
pub struct SingleTrigger {
    pub trigger: Trigger,
    pub listener: Listener,
}

impl SingleTrigger {
    pub fn new() -> Self {
        let (trigger, listener) = trigger();
        Self { trigger, listener }
    }
}

impl Default for SingleTrigger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_trigger() {
        let t = SingleTrigger::new();
        let clone = t.clone();
        t.trigger.trigger();
        // Returns immediately once triggered; clones observe the same signal
        t.listener.wait();
        clone.listener.wait();
    }
}
