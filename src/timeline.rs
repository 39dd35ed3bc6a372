use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Virtual-time event queue.
///
/// Events fire in due-time order; events due at the same millisecond fire
/// in the order they were scheduled. The clock only moves when the owner
/// pops events or calls [`Timeline::settle`].
#[derive(Debug)]
pub struct Timeline<E> {
    now: u64,
    seq: u64,
    queue: BinaryHeap<Reverse<Entry<E>>>,
}

#[derive(Debug)]
struct Entry<E> {
    at: u64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.at, self.seq).cmp(&(other.at, other.seq))
    }
}

impl<E> Timeline<E> {
    pub fn new(start: u64) -> Self {
        Self {
            now: start,
            seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn schedule_at(&mut self, at: u64, event: E) {
        let seq = self.seq;
        self.seq += 1;
        self.queue.push(Reverse(Entry { at, seq, event }));
    }

    pub fn schedule_in(&mut self, delay: u64, event: E) {
        self.schedule_at(self.now.saturating_add(delay), event);
    }

    /// Pop the earliest event due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<(u64, E)> {
        let due = matches!(self.queue.peek(), Some(Reverse(e)) if e.at <= until);
        if !due {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now = self.now.max(entry.at);
        Some((entry.at, entry.event))
    }

    /// Move the clock forward to `until` once every due event has been popped.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(e)| e.at)
    }
}
