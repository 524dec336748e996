//! Autosave Timer: Dedicated thread that periodically requests a save.
//!
//! The timer never saves anything itself. It posts an [`AutosaveRequest`]
//! and the main loop performs the save between frames, so file I/O and
//! status output only ever happen on the main loop.

use super::messages::AutosaveRequest;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Longest single sleep, so shutdown is noticed promptly.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Timer actor that posts autosave requests at a fixed interval.
#[derive(Debug)]
pub struct AutosaveTimer {
    /// Handle to the timer thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for requests.
    request_rx: Receiver<AutosaveRequest>,
}

impl AutosaveTimer {
    /// Spawn a timer that requests a save every `interval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(interval: Duration) -> std::io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // One slot: an unhandled request already covers any later one.
        let (request_tx, request_rx) = bounded(1);

        let handle = thread::Builder::new()
            .name("porta-autosave".to_string())
            .spawn(move || {
                Self::run_loop(&request_tx, &shutdown_clone, interval);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            request_rx,
        })
    }

    /// Get a reference to the request receiver, for use with `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<AutosaveRequest> {
        &self.request_rx
    }

    /// Signal the timer to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the timer thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main timer loop.
    fn run_loop(request_tx: &Sender<AutosaveRequest>, shutdown: &AtomicBool, interval: Duration) {
        let start = Instant::now();
        let mut sequence = 0u64;
        let mut next_request = start + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_request {
                sequence += 1;
                let request = AutosaveRequest {
                    sequence,
                    elapsed: now - start,
                };

                // Non-blocking: if a request is still pending, this one is redundant
                let _ = request_tx.try_send(request);

                next_request += interval;
                if next_request < now {
                    next_request = now + interval;
                }
            } else {
                thread::sleep((next_request - now).min(SLEEP_SLICE));
            }
        }
    }
}

impl Drop for AutosaveTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
