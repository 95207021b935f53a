use std::sync::Arc;

use crate::db::RateJournal;

#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<dyn RateJournal>,
}
