//! Application state.
//!
//! The storage backend is resolved once at startup and injected here, so
//! request handling never branches on the active profile.

use mediagate_core::Config;
use mediagate_storage::Storage;
use std::sync::Arc;

pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub config: Config,
}
