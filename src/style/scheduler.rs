// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Delayed delivery of service tasks.
//!
//! The service never runs a delayed task itself. A scheduler hands the task
//! back to whoever drives the service, which then calls
//! [`StyleService::run_task`](crate::style::StyleService::run_task) from its
//! own loop. That keeps every mutation on one thread.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use tracing::trace;

/// Work the service asks to have done later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Retry initialization once the host is ready.
    Initialize,
    /// Write the preferences document.
    SavePreferences,
}

/// Runs tasks after a delay. There is no cancellation: a scheduled task
/// always fires.
pub trait Scheduler {
    /// Schedules `task` to be delivered after `delay`.
    fn schedule(&mut self, delay: Duration, task: Task);
}

/// A deterministic scheduler driven by an explicit clock.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    entries: Vec<(Duration, u64, Task)>,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks that have not fired.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no task is waiting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time elapsed on the queue's clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the clock forward and returns the tasks that became due, in
    /// deadline order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Task> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|(deadline, _, _)| *deadline <= now);
        self.entries = pending;

        due.sort_by_key(|(deadline, seq, _)| (*deadline, *seq));
        due.into_iter().map(|(_, _, task)| task).collect()
    }

    /// Fires every waiting task regardless of its deadline.
    pub fn flush(&mut self) -> Vec<Task> {
        let latest = self
            .entries
            .iter()
            .map(|(deadline, _, _)| *deadline)
            .max()
            .unwrap_or(self.now);
        self.advance(latest.saturating_sub(self.now))
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, task: Task) {
        trace!(?task, ?delay, "task queued");
        self.entries.push((self.now + delay, self.next_seq, task));
        self.next_seq += 1;
    }
}

/// A scheduler that delivers tasks over a channel from timer threads.
#[derive(Debug, Clone)]
pub struct ChannelScheduler {
    sender: Sender<Task>,
}

impl ChannelScheduler {
    /// Creates a scheduler and the receiver its tasks arrive on.
    pub fn new() -> (Self, Receiver<Task>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, receiver)
    }
}

impl Scheduler for ChannelScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) {
        let sender = self.sender.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            // The receiver is gone when the host shut down; nothing to deliver to.
            let _ = sender.send(task);
        });
    }
}
