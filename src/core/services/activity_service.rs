use crate::core::models::event::HostEvent;
use crate::core::models::host::RequestContext;
use crate::core::services::recorder::ActivityRecorder;
use crate::core::services::translator::EventTranslator;
use crate::core::traits::host::HostDirectory;
use crate::core::traits::log_store::LogStore;

/// Entry point for host events: translate, then record.
pub struct ActivityService<'a, S: LogStore, H: HostDirectory + ?Sized> {
    recorder: &'a ActivityRecorder<S>,
    host: &'a H,
}

impl<'a, S: LogStore, H: HostDirectory + ?Sized> ActivityService<'a, S, H> {
    pub fn new(recorder: &'a ActivityRecorder<S>, host: &'a H) -> Self {
        Self { recorder, host }
    }

    /// Handle one host event. Returns the id of the written entry, if any.
    ///
    /// Storage failures are logged and swallowed so the audited action
    /// is never blocked by the audit log.
    pub fn handle(&self, ctx: &RequestContext, event: &HostEvent) -> Option<u64> {
        let message = EventTranslator::new(self.host).translate(ctx, event)?;

        match self.recorder.record(ctx, &message) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("could not record {} activity: {e}", event.name());
                None
            }
        }
    }
}
