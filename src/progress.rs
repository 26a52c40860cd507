use crossbeam_channel::Sender;

use crate::summary::BatchSummary;

/// Events a batch run emits, in order: one `FileStarted` and one
/// `Progress` per file, then exactly one `Finished`.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Processing of file `index` (0-based) out of `total` is about to
    /// begin.
    FileStarted {
        index: usize,
        total: usize,
        name: String,
    },
    /// Fraction of the batch completed so far, in [0, 100].
    Progress { percent: f32 },
    /// The batch ran to completion.
    Finished { summary: BatchSummary },
}

/// Sink for batch progress.
/// This allows different front ends to decide how events reach the
/// user: the GUI forwards them over a channel, tests collect them.
pub trait BatchObserver: Send {
    /// Processing of one file is about to begin.
    fn file_started(&self, index: usize, total: usize, name: &str);

    /// Update the overall completion percentage.
    fn progress(&self, percent: f32);

    /// The batch ran to completion.
    fn finished(&self, summary: &BatchSummary);
}

/// An observer that drops every event, for when progress reporting is
/// not needed.
pub struct NoOpObserver;

impl BatchObserver for NoOpObserver {
    fn file_started(&self, _index: usize, _total: usize, _name: &str) {}
    fn progress(&self, _percent: f32) {}
    fn finished(&self, _summary: &BatchSummary) {}
}

/// Forwards events over a channel to whatever owns the receiving end.
///
/// A send fails only when the receiver is gone; the run finishes the
/// remaining files regardless, so failures are ignored.
pub struct ChannelObserver {
    sender: Sender<BatchEvent>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<BatchEvent>) -> Self {
        Self { sender }
    }
}

impl BatchObserver for ChannelObserver {
    fn file_started(&self, index: usize, total: usize, name: &str) {
        let _ = self.sender.send(BatchEvent::FileStarted {
            index,
            total,
            name: name.to_string(),
        });
    }

    fn progress(&self, percent: f32) {
        let _ = self.sender.send(BatchEvent::Progress { percent });
    }

    fn finished(&self, summary: &BatchSummary) {
        let _ = self.sender.send(BatchEvent::Finished {
            summary: summary.clone(),
        });
    }
}
