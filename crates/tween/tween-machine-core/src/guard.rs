//! Scoped timeline acquisition.
//!
//! Construction captures the playhead and raises the busy indicator; `Drop`
//! restores the playhead and lowers the indicator on every exit path (normal
//! return, `?` propagation, or unwinding). The guard derefs to the host so the
//! batch keeps full access while the scope is held.

use std::ops::{Deref, DerefMut};

use log::trace;

use crate::host::Timeline;

pub struct TimelineGuard<'a, H: Timeline> {
    host: &'a mut H,
    captured_time: f64,
}

impl<'a, H: Timeline> TimelineGuard<'a, H> {
    pub fn acquire(host: &'a mut H) -> Self {
        let captured_time = host.current_time();
        host.begin_busy();
        trace!("timeline acquired at {captured_time}");
        Self {
            host,
            captured_time,
        }
    }

    #[inline]
    pub fn captured_time(&self) -> f64 {
        self.captured_time
    }
}

impl<H: Timeline> Deref for TimelineGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Timeline> DerefMut for TimelineGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Timeline> Drop for TimelineGuard<'_, H> {
    fn drop(&mut self) {
        self.host.set_current_time(self.captured_time);
        self.host.end_busy();
        trace!("timeline restored to {}", self.captured_time);
    }
}
