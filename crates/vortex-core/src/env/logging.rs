//! Deferred logging: buffers records emitted before a `tracing` subscriber is
//! guaranteed to be installed, then replays them once one exists.
//!
//! Loading can start very early in a process's life - potentially before the
//! host has installed its `tracing_subscriber` - so records logged during
//! that window would otherwise be silently dropped by the no-op default
//! subscriber. `DeferredLog` buffers a bounded number of them and replays
//! through `tracing` proper on demand.

use std::collections::VecDeque;

use tracing::Level;

/// Default ring-buffer capacity; oldest records are dropped once exceeded.
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
struct Record {
    level: Level,
    message: String,
}

/// A small bounded ring buffer of log records, replayed through `tracing`
/// once a subscriber is known to be installed.
#[derive(Debug)]
pub struct DeferredLog {
    capacity: usize,
    records: VecDeque<Record>,
}

impl DeferredLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    fn push(&mut self, level: Level, message: String) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(Record { level, message });
    }

    pub fn trace(&mut self, message: impl Into<String>) {
        self.push(Level::TRACE, message.into());
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.push(Level::DEBUG, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::INFO, message.into());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Emits every buffered record through `tracing` and clears the buffer.
    /// Safe to call more than once; a second call replays nothing.
    pub fn replay(&mut self) {
        for record in self.records.drain(..) {
            match record.level {
                Level::TRACE => tracing::trace!("{}", record.message),
                Level::DEBUG => tracing::debug!("{}", record.message),
                Level::INFO => tracing::info!("{}", record.message),
                Level::WARN => tracing::warn!("{}", record.message),
                Level::ERROR => tracing::error!("{}", record.message),
            }
        }
    }
}

impl Default for DeferredLog {
    fn default() -> Self {
        Self::new()
    }
}
