use std::sync::Arc;

use crate::db::SqliteRecordStore;
use crate::services::{AssignmentHelper, PortalService};

#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<PortalService>,
    pub helper: Arc<AssignmentHelper>,
    /// Present when backed by SQLite; used by the health check.
    pub db: Option<Arc<SqliteRecordStore>>,
}
