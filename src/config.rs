/// Sampling options for timeline synthesis.
///
/// Both intervals are strictly positive. The `with_*` setters take raw (possibly user-supplied)
/// values and keep the current setting when given zero or a negative number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOpts {
    time_interval: u64,
    frame_interval: usize,
}

impl ConvertOpts {
    /// Time units between two sampled keyframes.
    pub const DEFAULT_TIME_INTERVAL: u64 = 50;
    /// Raw frames between two sampled keyframes.
    pub const DEFAULT_FRAME_INTERVAL: usize = 5;

    pub fn time_interval(&self) -> u64 {
        self.time_interval
    }

    pub fn frame_interval(&self) -> usize {
        self.frame_interval
    }

    pub fn with_time_interval(mut self, value: i64) -> Self {
        match u64::try_from(value) {
            Ok(v) if v > 0 => self.time_interval = v,
            _ => tracing::debug!(value, "ignoring non-positive time interval"),
        }
        self
    }

    pub fn with_frame_interval(mut self, value: i64) -> Self {
        match usize::try_from(value) {
            Ok(v) if v > 0 => self.frame_interval = v,
            _ => tracing::debug!(value, "ignoring non-positive frame interval"),
        }
        self
    }
}

impl Default for ConvertOpts {
    fn default() -> Self {
        Self {
            time_interval: Self::DEFAULT_TIME_INTERVAL,
            frame_interval: Self::DEFAULT_FRAME_INTERVAL,
        }
    }
}
