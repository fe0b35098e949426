//! Frontier containers used by the search strategies.
//!
//! - [`FifoQueue`] - first-in first-out queue (breadth-first search)
//! - [`LifoStack`] - last-in first-out stack (depth-first search)
//! - [`PriorityQueue`] - binary heap ordered by priority (uniform-cost, A*)
//!
//! All three implement [`Frontier`], so the expansion loop is written once and
//! the strategy only decides which container to hand it. Removing from an
//! empty container returns `None`; it never panics.

use std::cmp::Ordering;
use std::collections::VecDeque;

/// Common interface of every frontier container.
pub trait Frontier<T> {
    /// Add an item. Containers without an ordering ignore `priority`.
    fn insert(&mut self, item: T, priority: u32);

    /// Remove the next item to expand.
    fn remove(&mut self) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out queue.
#[derive(Debug, Clone)]
pub struct FifoQueue<T> {
    elements: VecDeque<T>,
}

impl<T> FifoQueue<T> {
    pub fn new() -> Self {
        Self {
            elements: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, value: T) {
        self.elements.push_back(value);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.elements.pop_front()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for FifoQueue<T> {
    fn insert(&mut self, item: T, _priority: u32) {
        self.enqueue(item);
    }

    fn remove(&mut self) -> Option<T> {
        self.dequeue()
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Last-in first-out stack.
#[derive(Debug, Clone)]
pub struct LifoStack<T> {
    elements: Vec<T>,
}

impl<T> LifoStack<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.elements.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T> Default for LifoStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for LifoStack<T> {
    fn insert(&mut self, item: T, _priority: u32) {
        self.push(item);
    }

    fn remove(&mut self) -> Option<T> {
        self.pop()
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Which end of the priority range is popped first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOrder {
    /// Smallest priority first.
    Min,
    /// Largest priority first.
    Max,
}

#[derive(Debug, Clone)]
struct Element<T> {
    value: T,
    priority: u32,
    sequence: u64,
}

/// Binary heap keyed by an integer priority.
///
/// Entries with equal priority pop in insertion order, which keeps every
/// search deterministic for a given neighbour enumeration order.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    elements: Vec<Element<T>>,
    order: HeapOrder,
    next_sequence: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new(order: HeapOrder) -> Self {
        Self {
            elements: Vec::new(),
            order,
            next_sequence: 0,
        }
    }

    /// Queue that pops the lowest priority first.
    pub fn min() -> Self {
        Self::new(HeapOrder::Min)
    }

    /// Queue that pops the highest priority first.
    pub fn max() -> Self {
        Self::new(HeapOrder::Max)
    }

    pub fn push(&mut self, value: T, priority: u32) {
        self.elements.push(Element {
            value,
            priority,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        self.sift_up(self.elements.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let root = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Some(root.value)
    }

    /// Priority of the entry that [`PriorityQueue::pop`] would return next.
    pub fn peek_priority(&self) -> Option<u32> {
        self.elements.first().map(|e| e.priority)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// `true` when the entry at `a` must sit above the entry at `b`.
    fn precedes(&self, a: usize, b: usize) -> bool {
        let (a, b) = (&self.elements[a], &self.elements[b]);
        let by_priority = match self.order {
            HeapOrder::Min => a.priority.cmp(&b.priority),
            HeapOrder::Max => b.priority.cmp(&a.priority),
        };
        by_priority.then_with(|| a.sequence.cmp(&b.sequence)) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.precedes(index, parent) {
                break;
            }
            self.elements.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.elements.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut best = index;
            if left < len && self.precedes(left, best) {
                best = left;
            }
            if right < len && self.precedes(right, best) {
                best = right;
            }
            if best == index {
                break;
            }
            self.elements.swap(index, best);
            index = best;
        }
    }
}

impl<T> Frontier<T> for PriorityQueue<T> {
    fn insert(&mut self, item: T, priority: u32) {
        self.push(item, priority);
    }

    fn remove(&mut self) -> Option<T> {
        self.pop()
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}
