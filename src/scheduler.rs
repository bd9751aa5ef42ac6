//! Deferred work for the render manager.
//!
//! Two tiers share one queue: animation frames always drain before idle
//! commits, so an input region is never committed against a frame that
//! has not been applied yet.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Interpolate and apply the next blur/zoom frame
    AnimationFrame,
    /// Push the pending input region to the display layer
    CommitInputViewport,
}

impl Task {
    /// Higher runs first.
    pub fn priority(self) -> u8 {
        match self {
            Self::AnimationFrame => 1,
            Self::CommitInputViewport => 0,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    task: Task,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.task
            .priority()
            .cmp(&other.task.priority())
            // Earlier submissions first within a tier.
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue holding each task at most once
#[derive(Debug, Default)]
pub struct TaskQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` unless it is already waiting. Returns whether it was added.
    pub fn schedule(&mut self, task: Task) -> bool {
        if self.contains(task) {
            return false;
        }
        self.next_seq += 1;
        self.heap.push(Entry {
            task,
            seq: self.next_seq,
        });
        true
    }

    pub fn pop(&mut self) -> Option<Task> {
        self.heap.pop().map(|e| e.task)
    }

    pub fn contains(&self, task: Task) -> bool {
        self.heap.iter().any(|e| e.task == task)
    }

    pub fn cancel(&mut self, task: Task) {
        self.heap.retain(|e| e.task != task);
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_run_before_commits() {
        let mut queue = TaskQueue::new();
        queue.schedule(Task::CommitInputViewport);
        queue.schedule(Task::AnimationFrame);
        assert_eq!(queue.pop(), Some(Task::AnimationFrame));
        assert_eq!(queue.pop(), Some(Task::CommitInputViewport));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn duplicates_collapse() {
        let mut queue = TaskQueue::new();
        assert!(queue.schedule(Task::CommitInputViewport));
        assert!(!queue.schedule(Task::CommitInputViewport));
        assert_eq!(queue.len(), 1);
        queue.cancel(Task::CommitInputViewport);
        assert!(queue.is_empty());
    }
}
