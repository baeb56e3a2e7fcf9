//! Engine Configuration

/// Engine configuration options
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Length of generated unique ids and group ids
    pub uid_length: usize,

    /// Seed for id generation. `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Purge stale reference-count entries after every element registration
    pub sweep_on_register: bool,

    /// Deepest chain of inheriting child groups a single request may reach
    pub max_cascade_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            uid_length: 30,
            seed: None,
            sweep_on_register: true,
            max_cascade_depth: 64,
        }
    }
}

impl EngineConfig {
    /// Default configuration with deterministic ids
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
