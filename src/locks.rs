use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-identity mutation lock.
///
/// Cart reads and writes are read-modify-write cycles over a single document, so two requests for
/// the same user must not interleave. Requests for different users never contend.
#[derive(Debug, Default)]
pub struct UserLocks {
    inner: DashMap<String, Arc<Mutex<()>>>,
}

impl UserLocks {
    pub async fn acquire(&self, user_id: &str) -> OwnedMutexGuard<()> {
        // Clone the Arc out before awaiting so the shard guard is released.
        let lock = self
            .inner
            .entry(user_id.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
