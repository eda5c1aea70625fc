//! Cancellable delayed invocation.
//!
//! A [`Debouncer`] collapses a burst of triggers into a single call of its
//! action, made once the burst has been quiet for the configured delay. Only
//! the most recent trigger's argument is used.

use futures::future::BoxFuture;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

type Action<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

pub struct Debouncer<T> {
    delay: Duration,
    action: Action<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let action: Action<T> = Arc::new(move |arg| -> BoxFuture<'static, ()> { Box::pin(action(arg)) });
        Self {
            delay,
            action,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule the action for `delay` from now, replacing any pending call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&self, arg: T) {
        // Held across spawn and replace so concurrent triggers are ordered by the lock
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());

        let action = Arc::clone(&self.action);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Run detached: once the timer has fired the call is no longer pending
            tokio::spawn(action(arg));
        });

        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Drop the pending call, if any
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
