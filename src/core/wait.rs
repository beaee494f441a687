//! Wait-for-target loops over a phase queue.
//!
//! Shared by [`PhaseActor`](crate::PhaseActor) (shared queue) and
//! [`PhaseListener`](crate::PhaseListener) (dedicated queue). Every received
//! value that is not the target is discarded.

use std::time::{Duration, Instant};

use crate::{error::WaitError, phase::Phase, queue::SignalQueue};

pub(crate) fn wait_for(queue: &SignalQueue<Phase>, target: Phase) {
    while queue.receive() != target {}
}

pub(crate) fn wait_for_timeout(
    queue: &SignalQueue<Phase>,
    target: Phase,
    timeout: Duration,
) -> Result<(), WaitError> {
    let Some(deadline) = Instant::now().checked_add(timeout) else {
        wait_for(queue, target);
        return Ok(());
    };

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match queue.receive_timeout(remaining) {
            Some(phase) if phase == target => return Ok(()),
            Some(_) => continue,
            None => return Err(WaitError::Timeout { timeout }),
        }
    }
}

pub(crate) async fn wait_for_async(queue: &SignalQueue<Phase>, target: Phase) {
    while queue.receive_async().await != target {}
}
