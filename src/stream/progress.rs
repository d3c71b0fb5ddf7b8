/// Throttled progress observer for one stream.
///
/// The callback is given the cumulative number of source bytes read. It fires only when that count
/// has grown by at least `interval` since the last report, so reports are strictly increasing.
pub struct ProgressReporter<'a> {
    callback: Option<&'a mut dyn FnMut(u64)>,
    interval: u64,
    last_reported: u64,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(interval: u64, callback: Option<&'a mut dyn FnMut(u64)>) -> Self {
        Self {
            callback,
            interval,
            last_reported: 0,
        }
    }

    /// A reporter that never calls anything.
    pub fn silent() -> Self {
        Self::new(0, None)
    }

    /// Offer the current cumulative byte count.
    pub fn update(&mut self, cumulative: u64) {
        let Some(callback) = self.callback.as_mut() else {
            return;
        };
        let delta = cumulative.saturating_sub(self.last_reported);
        if delta > 0 && delta >= self.interval {
            self.last_reported = cumulative;
            callback(cumulative);
        }
    }

    /// The count given to the most recent report, 0 before the first.
    pub fn last_reported(&self) -> u64 {
        self.last_reported
    }
}
