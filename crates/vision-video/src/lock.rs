use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::VideoSourceError;

/// Binary semaphore guarding camera open and close.
///
/// Acquiring hands out an [`OpenClosePermit`] that gives the permit back
/// when dropped, including on unwind. The permit may be moved to another
/// thread: `attach` takes it and the background thread drops it once the
/// device has opened.
#[derive(Debug)]
pub struct OpenCloseLock {
    available: Mutex<bool>,
    signal: Condvar,
}

/// Held permit of an [`OpenCloseLock`]. Dropping it releases the lock.
#[derive(Debug)]
pub struct OpenClosePermit {
    lock: Arc<OpenCloseLock>,
}

impl Drop for OpenClosePermit {
    fn drop(&mut self) {
        self.lock.release();
    }
}

fn poisoned() -> VideoSourceError {
    VideoSourceError::Lock("camera lock poisoned".to_string())
}

impl OpenCloseLock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            available: Mutex::new(true),
            signal: Condvar::new(),
        })
    }

    /// Take the permit, waiting at most `timeout`. Returns `Ok(None)` on timeout.
    pub fn try_acquire_for(
        self: &Arc<Self>,
        timeout: Duration,
    ) -> Result<Option<OpenClosePermit>, VideoSourceError> {
        let deadline = Instant::now() + timeout;
        let mut available = self.available.lock().map_err(|_| poisoned())?;
        while !*available {
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            let (guard, _) = self
                .signal
                .wait_timeout(available, deadline - now)
                .map_err(|_| poisoned())?;
            available = guard;
        }
        *available = false;
        Ok(Some(OpenClosePermit {
            lock: Arc::clone(self),
        }))
    }

    /// Take the permit, waiting as long as it takes.
    pub fn acquire(self: &Arc<Self>) -> Result<OpenClosePermit, VideoSourceError> {
        let mut available = self.available.lock().map_err(|_| poisoned())?;
        while !*available {
            available = self.signal.wait(available).map_err(|_| poisoned())?;
        }
        *available = false;
        Ok(OpenClosePermit {
            lock: Arc::clone(self),
        })
    }

    fn release(&self) {
        let mut available = self.available.lock().unwrap_or_else(|e| e.into_inner());
        *available = true;
        self.signal.notify_one();
    }

    pub fn is_available(&self) -> bool {
        *self.available.lock().unwrap_or_else(|e| e.into_inner())
    }
}
