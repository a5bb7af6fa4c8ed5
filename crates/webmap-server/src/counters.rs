use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Pipeline instrumentation. Each counter is updated independently; readers get an approximate
/// picture, never a consistent snapshot.
#[derive(Debug, Default)]
pub struct Counters {
    total_renders: AtomicU64,
    // Signed: a reset while work is in flight lets these dip below zero until it completes.
    outstanding_renders: AtomicI64,
    outstanding_uploads: AtomicI64,
    bytes_sent: AtomicU64,
    bodies_sent: AtomicU64,
}

/// Decrements its counter when dropped, whether the task finished, failed or panicked
pub struct InFlight<'a> {
    counter: &'a AtomicI64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Release);
    }
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_queued(&self) {
        self.outstanding_renders.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes over one queued render; the outstanding count drops when the guard does
    pub fn render_started(&self) -> InFlight<'_> {
        InFlight {
            counter: &self.outstanding_renders,
        }
    }

    pub fn render_completed(&self) {
        self.total_renders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn upload_queued(&self) {
        self.outstanding_uploads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn upload_started(&self) -> InFlight<'_> {
        InFlight {
            counter: &self.outstanding_uploads,
        }
    }

    pub fn body_sent(&self, bytes: usize) {
        self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
        self.bodies_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Zeroes the render and upload counters. Traffic totals are kept.
    pub fn reset_activity(&self) {
        self.total_renders.store(0, Ordering::Relaxed);
        self.outstanding_renders.store(0, Ordering::Relaxed);
        self.outstanding_uploads.store(0, Ordering::Relaxed);
    }

    pub fn total_renders(&self) -> u64 {
        self.total_renders.load(Ordering::Relaxed)
    }

    pub fn outstanding_renders(&self) -> i64 {
        self.outstanding_renders.load(Ordering::Acquire)
    }

    pub fn outstanding_uploads(&self) -> i64 {
        self.outstanding_uploads.load(Ordering::Acquire)
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    pub fn bodies_sent(&self) -> u64 {
        self.bodies_sent.load(Ordering::Relaxed)
    }
}
