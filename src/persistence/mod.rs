//! Best-score persistence
//!
//! A single best-effort key-value pair. Storage failures are swallowed:
//! a missing or broken backend means the record simply does not update
//! for the session, and gameplay is never interrupted.

/// Capability for reading/writing the best recorded score.
///
/// Implementations return `None`/no-op on failure instead of erroring.
pub trait BestScoreStore {
    fn load(&self) -> Option<u32>;
    fn store(&mut self, score: u32);
}

/// Record `score` if it strictly beats the stored best.
/// Returns true when the record was updated.
pub fn record_best(store: &mut dyn BestScoreStore, score: u32) -> bool {
    let best = store.load().unwrap_or(0);
    if score > best {
        store.store(score);
        log::info!("new best score: {score}");
        true
    } else {
        false
    }
}

/// In-memory store: native default and test double
#[derive(Debug, Default)]
pub struct MemoryStore {
    best: Option<u32>,
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Option<u32> {
        self.best
    }

    fn store(&mut self, score: u32) {
        self.best = Some(score);
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    const STORAGE_KEY: &'static str = "lane_rush_best";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStore {
    fn load(&self) -> Option<u32> {
        let raw = Self::storage()?.get_item(Self::STORAGE_KEY).ok()??;
        raw.parse().ok()
    }

    fn store(&mut self, score: u32) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(Self::STORAGE_KEY, &score.to_string()).is_err() {
                log::debug!("best score write failed, ignoring");
            }
        }
    }
}

/// The store for the current platform
pub fn platform_store() -> Box<dyn BestScoreStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(LocalStore)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(MemoryStore::default())
    }
}
