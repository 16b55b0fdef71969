use std::time::Duration;

/// Protocol version exchanged in handshakes.
pub const PROTOCOL_VERSION: &str = "0.0.1";

/// Every tunable of the network in one place. Components receive an
/// `Arc<Params>` at construction instead of reaching for globals.
#[derive(Clone, Debug)]
pub struct Params {
    /// Version string sent in handshakes
    pub protocol_version: String,

    /// Leading zero bytes a mined block hash must carry
    pub pow_difficulty: usize,

    /// Value of the single genesis coinbase output
    pub genesis_reward: u64,

    /// Period of the known-address connect loop
    pub connect_interval: Duration,
    /// Period of the peer ping loop
    pub ping_interval: Duration,
    /// A peer whose last ping is older than this is due for a liveness check
    pub ping_stale: Duration,
    /// Dial failures after which a known address is dropped
    pub max_connect_attempts: u32,

    /// Pause between mining rounds
    pub mining_interval: Duration,
    /// Upper bound on a single nonce search
    pub max_mining_duration: Duration,

    /// Period of the blockchain sync loop
    pub sync_interval: Duration,
    /// Period of the node-info log line
    pub info_interval: Duration,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            pow_difficulty: 1,
            genesis_reward: 100_000,
            connect_interval: Duration::from_secs(5),
            ping_interval: Duration::from_secs(6),
            ping_stale: Duration::from_secs(50),
            max_connect_attempts: 100,
            mining_interval: Duration::from_secs(5),
            max_mining_duration: Duration::from_secs(10),
            sync_interval: Duration::from_secs(5),
            info_interval: Duration::from_secs(3),
        }
    }
}
