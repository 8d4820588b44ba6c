use std::sync::Arc;

use tokio::sync::Mutex;

use crate::storage::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,

    /// Serializes pairing requests. The engine itself is lock-free; two
    /// concurrent pairings over the same history could both look valid and
    /// together seat a rematch, so the calling layer holds this across the
    /// whole read-compute-write span.
    pub pairing_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            pairing_lock: Arc::new(Mutex::new(())),
        }
    }
}
