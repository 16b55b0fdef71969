use blocknet_addressmanager::AddressManager;
use blocknet_p2p_lib::Adaptor;
use log::debug;
use parking_lot::Mutex as ParkingLotMutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::interval;

/// Drives the known-address table toward live peers. Each iteration
/// snapshots the table, dials every eligible entry and atomically replaces
/// the table with the rebuilt outcome: promoted addresses leave, failed ones
/// back off with an incremented counter, exhausted ones drop.
pub struct ConnectionManager {
    adaptor: Arc<Adaptor>,
    amgr: Arc<ParkingLotMutex<AddressManager>>,
    max_connect_attempts: u32,
    force_next_iteration: UnboundedSender<()>,
    shutdown_signal: UnboundedSender<()>,
}

impl ConnectionManager {
    pub fn new(
        adaptor: Arc<Adaptor>,
        amgr: Arc<ParkingLotMutex<AddressManager>>,
        max_connect_attempts: u32,
        connect_interval: Duration,
    ) -> Arc<Self> {
        let (tx, rx) = unbounded_channel::<()>();
        let (shutdown_signal_tx, shutdown_signal_rx) = unbounded_channel();
        let manager = Arc::new(Self {
            adaptor,
            amgr,
            max_connect_attempts,
            force_next_iteration: tx,
            shutdown_signal: shutdown_signal_tx,
        });
        manager.clone().start_event_loop(rx, shutdown_signal_rx, connect_interval);
        manager
    }

    fn start_event_loop(
        self: Arc<Self>,
        mut rx: UnboundedReceiver<()>,
        mut shutdown_signal_rx: UnboundedReceiver<()>,
        connect_interval: Duration,
    ) {
        let mut ticker = interval(connect_interval);
        tokio::spawn(async move {
            loop {
                select! {
                    _ = rx.recv() => self.clone().handle_event().await,
                    _ = ticker.tick() => self.clone().handle_event().await,
                    _ = shutdown_signal_rx.recv() => break,
                }
            }
            debug!("Connection manager event loop exiting");
        });
    }

    /// Forces the next connect iteration without waiting for the ticker
    /// (used right after bootstrap seeding).
    pub fn force_next_iteration(&self) {
        let _ = self.force_next_iteration.send(());
    }

    pub fn stop(&self) {
        let _ = self.shutdown_signal.send(());
    }

    async fn handle_event(self: Arc<Self>) {
        debug!("Starting connection loop iteration");
        let snapshot = self.amgr.lock().snapshot();
        let mut rebuilt = HashMap::with_capacity(snapshot.len());
        let mut discovered = Vec::new();

        for (address, attempts) in snapshot {
            // Already live or ourselves: the entry leaves the table
            if !self.adaptor.can_connect_with(&address) {
                continue;
            }
            match self.adaptor.connect_peer(&address).await {
                Ok(gossiped) => {
                    debug!("Connected to {}", address);
                    discovered.extend(gossiped);
                }
                Err(err) if attempts < self.max_connect_attempts => {
                    debug!("Failed connecting to {}, will retry later: {}", address, err);
                    rebuilt.insert(address, attempts + 1);
                }
                Err(err) => {
                    debug!("Failed connecting to {}, reached the attempt limit, dropping: {}", address, err);
                }
            }
        }

        // Swap in the rebuilt table and seed freshly gossiped addresses in
        // the same critical section
        let mut amgr = self.amgr.lock();
        amgr.replace(rebuilt);
        for address in discovered {
            if self.adaptor.can_connect_with(&address) {
                amgr.add_address(&address);
            }
        }
    }
}
