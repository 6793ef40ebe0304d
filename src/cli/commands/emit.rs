use std::io::Read;

use crate::cli::commands::session::Session;
use crate::cli::output;
use crate::core::errors::{ActlogError, Result};
use crate::core::models::event::HostEvent;
use crate::core::services::activity_service::ActivityService;
use crate::core::services::recorder::ActivityRecorder;

/// Execute the `actlog emit` command.
///
/// Parses one host event and records it on behalf of the `--as` actor.
/// A failed write is reported as a warning, never as a failed command:
/// the host action being audited has already happened.
pub fn execute(event: Option<&str>, actor: Option<&str>, origin: Option<&str>) -> Result<()> {
    let raw = match event {
        Some(raw) => raw.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ActlogError::InvalidEvent {
                    detail: format!("cannot read event from stdin: {e}"),
                })?;
            buf
        }
    };
    let event = HostEvent::from_json(&raw)?;

    let session = Session::open(actor, origin)?;
    let recorder = ActivityRecorder::new(session.store);
    let service = ActivityService::new(&recorder, &session.host);

    match service.handle(&session.ctx, &event) {
        Some(id) => output::success(&format!("Recorded {} as entry #{id}", event.name())),
        None => output::warning(&format!("Nothing recorded for {}", event.name())),
    }

    Ok(())
}
