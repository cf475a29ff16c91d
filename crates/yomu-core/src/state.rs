use std::sync::{Arc, PoisonError, RwLock};

/// Swappable immutable snapshot.
///
/// Readers take an `Arc` and keep using it for as long as they like; a swap
/// only changes what the next `load` returns. The value itself is never
/// mutated in place.
#[derive(Debug)]
pub struct Snapshot<T> {
    current: RwLock<Arc<T>>,
}

impl<T> Snapshot<T> {
    pub fn new(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    pub fn from_arc(value: Arc<T>) -> Self {
        Self {
            current: RwLock::new(value),
        }
    }

    pub fn load(&self) -> Arc<T> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Install `value` and return the snapshot it replaced
    pub fn swap(&self, value: T) -> Arc<T> {
        let next = Arc::new(value);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!("Swapping snapshot");
        std::mem::replace(&mut *guard, next)
    }
}
