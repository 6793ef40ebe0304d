use crate::core::errors::Result;
use crate::core::models::host::RequestContext;
use crate::core::models::log_entry::UNKNOWN_ORIGIN;
use crate::core::traits::log_store::LogStore;

/// Write path of the activity log.
pub struct ActivityRecorder<S: LogStore> {
    pub store: S,
}

impl<S: LogStore> ActivityRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record `message` on behalf of the context's actor.
    ///
    /// Anonymous activity is not logged: without an actor this writes
    /// nothing and returns `Ok(None)`.
    pub fn record(&self, ctx: &RequestContext, message: &str) -> Result<Option<u64>> {
        let Some(actor) = &ctx.actor else {
            log::debug!("skipping anonymous activity: {message}");
            return Ok(None);
        };

        let origin = ctx
            .origin
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .unwrap_or(UNKNOWN_ORIGIN);

        let id = self.store.insert(actor.id, message, origin)?;
        log::debug!("recorded activity #{id} for actor {}", actor.id);
        Ok(Some(id))
    }
}
