use std::sync::Arc;

use crate::config::ServerConfig;
use crate::rooms::RoomRegistry;
use crate::services::rooms::RoomService;
use crate::ws::hub::RoomHub;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    rooms: Arc<RoomService>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let hub = Arc::new(RoomHub::new());
        let rooms = RoomService::new(registry, hub, config.game_url_prefix.clone());
        Self {
            config: Arc::new(config),
            rooms: Arc::new(rooms),
        }
    }

    pub fn rooms(&self) -> &Arc<RoomService> {
        &self.rooms
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        self.rooms.registry()
    }

    pub fn hub(&self) -> &Arc<RoomHub> {
        self.rooms.hub()
    }

    /// Create a test AppState with default configuration
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(ServerConfig::default())
    }
}
