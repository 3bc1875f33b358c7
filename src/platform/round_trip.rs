//=========================================================================
// Bounded Round-Trips
//=========================================================================
//
// Waits for a native acknowledgement without risking a hang.
//
// Some protocol steps only complete once the OS answers: an X11 window
// manager publishing `_NET_FRAME_EXTENTS`, or winit running the handler
// callback that actually creates a window. The poll closure drives the
// native queue one step and reports the answer once it has arrived.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::error::PlatformError;

//=== Constants ===========================================================

/// Sleep between polls; keeps the wait from spinning a core.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

//=== wait_until ==========================================================

/// Polls `poll` until it yields a value or `timeout` has elapsed.
///
/// `poll` is always called at least once, so an answer that is already
/// queued is picked up even with a tiny timeout.
pub(crate) fn wait_until<T>(
    operation: &'static str,
    timeout: Duration,
    mut poll: impl FnMut() -> Option<T>,
) -> Result<T, PlatformError> {
    let started = Instant::now();

    loop {
        if let Some(value) = poll() {
            return Ok(value);
        }

        let waited = started.elapsed();
        if waited >= timeout {
            warn!(target: "platform", "Gave up waiting for {} after {:?}", operation, waited);
            return Err(PlatformError::RoundTripTimeout { operation, waited });
        }

        thread::sleep(POLL_INTERVAL.min(timeout - waited));
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_answer_is_returned() {
        let result = wait_until("test wait", Duration::from_millis(5), || Some(7));
        assert_eq!(result.ok(), Some(7));
    }

    #[test]
    fn answer_after_a_few_polls_is_returned() {
        let mut polls = 0;
        let result = wait_until("test wait", Duration::from_secs(5), || {
            polls += 1;
            (polls == 3).then_some("ready")
        });

        assert_eq!(result.ok(), Some("ready"));
        assert_eq!(polls, 3);
    }

    #[test]
    fn silence_times_out() {
        let result: Result<(), _> = wait_until("frame extents", Duration::from_millis(5), || None);

        match result {
            Err(PlatformError::RoundTripTimeout { operation, waited }) => {
                assert_eq!(operation, "frame extents");
                assert!(waited >= Duration::from_millis(5));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn zero_timeout_still_polls_once() {
        let mut polls = 0;
        let result: Result<(), _> = wait_until("test wait", Duration::ZERO, || {
            polls += 1;
            None
        });

        assert!(result.is_err());
        assert_eq!(polls, 1);
    }
}
