use crate::packet::Packet;
use crossbeam::queue::SegQueue;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use webmap_logger::log;
use webmap_logger::LogSeverity::Debug;

/// Default number of packets per automatic flush
pub const BATCH_SIZE: usize = 100;

/// Receives flushed batches. Implementations must hand the batch off and return without waiting
/// for the network.
pub trait BatchSink {
    fn dispatch(&self, endpoint: &str, batch: Vec<Packet>);
}

/// Collects packets per endpoint and releases them in batches of at most `cap`.
pub struct BatchCompactor {
    cap: usize,
    batches: RwLock<HashMap<String, Arc<SegQueue<Packet>>>>,
}

impl BatchCompactor {
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            batches: RwLock::new(HashMap::new()),
        }
    }

    fn queue(&self, endpoint: &str) -> Arc<SegQueue<Packet>> {
        if let Some(queue) = self
            .batches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(endpoint)
        {
            return Arc::clone(queue);
        }

        let mut batches = self
            .batches
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            batches
                .entry(endpoint.to_owned())
                .or_insert_with(|| Arc::new(SegQueue::new())),
        )
    }

    /// Queues a packet. Once the endpoint holds `cap` or more packets, one batch of up to `cap`
    /// is flushed to `sink`; anything beyond it waits for the next trigger.
    pub fn append(&self, endpoint: &str, packet: Packet, sink: &dyn BatchSink) {
        let queue = self.queue(endpoint);
        queue.push(packet);

        if queue.len() >= self.cap {
            self.flush_one(endpoint, &queue, sink);
        }
    }

    /// Drains every endpoint in batches of at most `cap` until its queue is observed empty.
    /// Returns the number of batches dispatched.
    pub fn sync_all(&self, sink: &dyn BatchSink) -> usize {
        let snapshot: Vec<(String, Arc<SegQueue<Packet>>)> = self
            .batches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(endpoint, queue)| (endpoint.clone(), Arc::clone(queue)))
            .collect();

        let mut flushes = 0;
        for (endpoint, queue) in snapshot {
            while !queue.is_empty() {
                if self.flush_one(&endpoint, &queue, sink) == 0 {
                    break;
                }
                flushes += 1;
            }
        }
        flushes
    }

    /// Polls up to `cap` packets and dispatches them. Returns how many were sent.
    fn flush_one(&self, endpoint: &str, queue: &SegQueue<Packet>, sink: &dyn BatchSink) -> usize {
        let mut batch = Vec::with_capacity(self.cap);
        while batch.len() < self.cap {
            match queue.pop() {
                Some(packet) => batch.push(packet),
                None => break,
            }
        }

        let size = batch.len();
        if size > 0 {
            log(format!("Flushing {} packets to {}", size, endpoint), Debug);
            sink.dispatch(endpoint, batch);
        }
        size
    }

    pub fn pending(&self, endpoint: &str) -> usize {
        self.batches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(endpoint)
            .map_or(0, |queue| queue.len())
    }

    pub fn pending_total(&self) -> usize {
        self.batches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|queue| queue.len())
            .sum()
    }
}

impl Default for BatchCompactor {
    fn default() -> Self {
        Self::new(BATCH_SIZE)
    }
}
