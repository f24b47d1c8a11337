use std::sync::Arc;

use checklist_db::DbPool;

use crate::config::ServerConfig;
use crate::services::ChecklistService;

/// Handler state. Clones share the pool and the config.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Checklist operations over this state's pool.
    pub fn checklists(&self) -> ChecklistService<'_> {
        ChecklistService::new(&self.pool)
    }
}
