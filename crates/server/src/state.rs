use std::sync::Arc;

use configs::HakoConfig;
use store::Storage;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub config: Arc<HakoConfig>,
}
