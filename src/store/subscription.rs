use std::fmt;

/// Handle to an active store subscription.
///
/// Dropping the handle (or calling [`cancel`](Subscription::cancel))
/// unregisters the listener. Holding it for the life of a view and letting
/// it drop on teardown is the intended use; a leaked handle keeps the
/// listener firing for the life of the store.
pub struct Subscription {
    unregister: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(unregister: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unregister: Some(Box::new(unregister)),
        }
    }

    /// A handle with nothing to unregister.
    pub fn noop() -> Self {
        Self { unregister: None }
    }

    /// Unregister the listener now instead of at drop.
    pub fn cancel(mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}
