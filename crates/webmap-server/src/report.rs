use crate::counters::Counters;

/// Point-in-time copy of the pipeline counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total_renders: u64,
    pub outstanding_renders: i64,
    pub outstanding_uploads: i64,
    pub bytes_sent: u64,
    pub bodies_sent: u64,
}

impl Stats {
    pub fn capture(counters: &Counters) -> Self {
        Self {
            total_renders: counters.total_renders(),
            outstanding_renders: counters.outstanding_renders(),
            outstanding_uploads: counters.outstanding_uploads(),
            bytes_sent: counters.bytes_sent(),
            bodies_sent: counters.bodies_sent(),
        }
    }

    pub fn average_body_size(&self) -> u64 {
        self.bytes_sent.checked_div(self.bodies_sent).unwrap_or(0)
    }

    /// Summary shown to operators on request
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!(
                " Total chunks rendered: {}",
                human_readable(self.total_renders as i64, "")
            ),
            format!(
                " Total chunks uploaded: {}",
                human_readable(self.bytes_sent as i64, "B")
            ),
            format!(
                " Avg packet size: {}",
                human_readable(self.average_body_size() as i64, "B")
            ),
        ]
    }

    /// One-line status for debug overlays
    pub fn debug_line(&self) -> String {
        format!(
            "Web map: {} total, {} queued, {} uploads",
            self.total_renders,
            self.outstanding_renders.max(0),
            self.outstanding_uploads.max(0)
        )
    }
}

/// Formats `value` with SI prefixes in steps of 1000, e.g. `1.5 kB`. Values below 1000 print
/// as `<value> B`.
pub fn human_readable(value: i64, postfix: &str) -> String {
    if -1000 < value && value < 1000 {
        return format!("{} B", value);
    }

    let mut value = value;
    let mut prefixes = "kMGTPE".chars();
    let mut prefix = prefixes.next().unwrap_or('k');
    while value <= -999_950 || value >= 999_950 {
        value /= 1000;
        prefix = prefixes.next().unwrap_or(prefix);
    }
    format!("{:.1} {}{}", value as f64 / 1000.0, prefix, postfix)
}
