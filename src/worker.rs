//! Run an extraction off the caller's thread and stream its progress back.

use crate::error::SplitError;
use crate::split::{extract_range, PageProgress, SplitOutcome, SplitRequest};
use log::warn;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum SplitEvent {
    Progress(PageProgress),
    /// Always the last event of a run
    Finished(Result<SplitOutcome, SplitError>),
}

/// Start `request` on the blocking pool.
///
/// The receiver yields one `Progress` per copied page followed by a single
/// `Finished`. It closes without `Finished` only if the worker died. Dropping
/// the receiver does not stop the extraction.
pub fn spawn(request: SplitRequest) -> mpsc::UnboundedReceiver<SplitEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let result = extract_range(&request, |progress| {
            // A closed receiver just means nobody is watching any more
            let _ = tx.send(SplitEvent::Progress(progress));
        });
        if tx.send(SplitEvent::Finished(result)).is_err() {
            warn!(
                "split of {} finished after its caller went away",
                request.input.display()
            );
        }
    });

    rx
}

/// Drive a spawned run to completion, handing each progress event to
/// `on_progress`.
pub async fn run<F>(request: SplitRequest, mut on_progress: F) -> anyhow::Result<SplitOutcome>
where
    F: FnMut(PageProgress),
{
    let mut events = spawn(request);
    while let Some(event) = events.recv().await {
        match event {
            SplitEvent::Progress(progress) => on_progress(progress),
            SplitEvent::Finished(result) => return Ok(result?),
        }
    }
    anyhow::bail!("Split worker stopped without reporting a result")
}
