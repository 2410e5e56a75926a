//! Settings for the scripted demo run.

use std::time::Duration;

use log::LevelFilter;

use super::SimulatedUserApi;

/// Demo settings. [`Default`] reproduces the scripted run: user 101 fetched
/// after a one second delay, succeeding, logged at `Info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub user_id: u64,
    pub fetch_delay: Duration,
    pub simulate_failure: bool,
    pub log_level: LevelFilter,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            user_id: 101,
            fetch_delay: Duration::from_secs(1),
            simulate_failure: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl DemoConfig {
    /// The simulated API described by these settings.
    pub fn simulated_api(&self) -> SimulatedUserApi {
        let api = SimulatedUserApi::new(self.fetch_delay);
        if self.simulate_failure {
            api.failing()
        } else {
            api
        }
    }
}
