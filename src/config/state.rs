// Application state module
// Bundles the loaded configuration with the route table built at startup

use crate::routing::RouteTable;

use super::types::Config;

/// Application state shared across connections
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(config: &Config, routes: RouteTable) -> Self {
        Self {
            config: config.clone(),
            routes,
        }
    }
}
