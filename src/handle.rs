//! Initialize-once client handles.
//!
//! DESIGN
//! ======
//! Remote clients are built on first use and then shared read-only for the
//! process lifetime. `tokio::sync::OnceCell` makes concurrent first uses
//! converge on a single instance. A failed construction is not cached, so a
//! later call retries the factory (the Reports page relies on this while its
//! API key is still missing).

use std::sync::Arc;

use tokio::sync::OnceCell;

type Factory<T, E> = Box<dyn Fn() -> Result<Arc<T>, E> + Send + Sync>;

pub struct LazyHandle<T: ?Sized, E> {
    cell: OnceCell<Arc<T>>,
    factory: Factory<T, E>,
}

impl<T: ?Sized, E> LazyHandle<T, E> {
    /// A handle that runs `factory` on first use.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<T>, E> + Send + Sync + 'static,
    {
        Self { cell: OnceCell::new(), factory: Box::new(factory) }
    }

    /// A handle that is already initialized (tests inject mocks this way).
    #[cfg(test)]
    pub fn ready(value: Arc<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        let fallback = Arc::clone(&value);
        Self { cell: OnceCell::new_with(Some(value)), factory: Box::new(move || Ok(Arc::clone(&fallback))) }
    }

    /// Return the shared instance, constructing it if needed.
    ///
    /// # Errors
    ///
    /// Returns the factory's error when construction fails.
    pub async fn get(&self) -> Result<Arc<T>, E> {
        self.cell
            .get_or_try_init(|| async { (self.factory)() })
            .await
            .map(Arc::clone)
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
#[path = "handle_test.rs"]
mod tests;
