use crate::error::ConfigError;

pub const DEFAULT_CONTEXT_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tokens shown around a term occurrence: half before, half after.
    pub context_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self { Self { context_window: DEFAULT_CONTEXT_WINDOW } }
}

impl EngineConfig {
    pub fn new(context_window: usize) -> Result<Self, ConfigError> {
        if context_window < 2 || context_window % 2 != 0 {
            return Err(ConfigError::InvalidWindow(context_window));
        }
        Ok(Self { context_window })
    }
}
