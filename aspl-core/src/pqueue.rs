//! Binary heap priority queue with mutable priorities.

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

use crate::numtraits::IntoOrd;

#[derive(Error, Copy, Clone, PartialEq, Eq, Debug)]
pub enum QueueError {
    #[error("Priority queue is empty")]
    Empty,

    #[error("Element is already queued")]
    AlreadyQueued,
}

/// Priority queue of unique elements.
///
/// Internally an array-based binary heap plus a hashmap index
/// linking every queued element to its slot in the heap,
/// so `push()`, `pop()` and `change_priority()` are all `O(log n)`
/// and `contains()` is `O(1)`.
///
/// Elements with equal priority are popped in unspecified order.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T, P> {
    /// Implicit binary tree: children of slot `i` are `2i + 1` and `2i + 2`.
    heap: Vec<(T, P)>,

    /// Links element `<T>` to its slot in the `heap`.
    index: HashMap<T, usize>,

    /// `true` if the greatest priority is popped first.
    prefer_high: bool,
}

impl<T, P> PriorityQueue<T, P> where T: Clone + Eq + Hash, P: Clone + IntoOrd {
    /// Create new empty queue. If `prefer_high_values` is `true` the element with the
    /// greatest priority value is on top, otherwise the one with the least.
    pub fn new(prefer_high_values: bool) -> Self {
        PriorityQueue {
            heap: Vec::new(),
            index: HashMap::new(),
            prefer_high: prefer_high_values,
        }
    }

    /// Queue popping the lowest priority value first.
    pub fn min_first() -> Self {
        Self::new(false)
    }

    /// Queue popping the highest priority value first.
    pub fn max_first() -> Self {
        Self::new(true)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    pub fn contains(&self, element: &T) -> bool {
        self.index.contains_key(element)
    }

    /// Current priority of a queued element.
    pub fn priority(&self, element: &T) -> Option<&P> {
        self.index.get(element).map(|&i| &self.heap[i].1)
    }

    /// Element on top of the queue, without removing it.
    pub fn top(&self) -> Result<&T, QueueError> {
        self.heap.first().map(|(t, _)| t).ok_or(QueueError::Empty)
    }

    /// Insert an element with the given priority.
    /// Each element can be queued only once, use `change_priority()` to requeue it.
    pub fn push(&mut self, element: T, priority: P) -> Result<(), QueueError> {
        if self.index.contains_key(&element) {
            return Err(QueueError::AlreadyQueued);
        }

        let pos = self.heap.len();
        self.index.insert(element.clone(), pos);
        self.heap.push((element, priority));
        self.sift_up(pos);

        Ok(())
    }

    /// Remove and return the element on top of the queue.
    pub fn pop(&mut self) -> Result<T, QueueError> {
        if self.heap.is_empty() {
            return Err(QueueError::Empty);
        }

        let last = self.heap.len() - 1;
        self.swap_slots(0, last);
        let (element, _) = self.heap.pop().ok_or(QueueError::Empty)?;
        self.index.remove(&element);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Ok(element)
    }

    /// Set new priority of a queued element, in either direction.
    /// Returns `false` and does nothing if the element is not queued.
    pub fn change_priority(&mut self, element: &T, priority: P) -> bool {
        if let Some(&pos) = self.index.get(element) {
            self.heap[pos].1 = priority;
            let pos = self.sift_up(pos);
            self.sift_down(pos);
            true
        } else {
            false
        }
    }

    /// Whether priority `a` should be popped before priority `b`.
    fn precedes(&self, a: &P, b: &P) -> bool {
        let (a, b) = (a.clone().into_ord(), b.clone().into_ord());
        if self.prefer_high { a > b } else { a < b }
    }

    fn swap_slots(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.heap.swap(i, j);
        if let Some(slot) = self.index.get_mut(&self.heap[i].0) {
            *slot = i;
        }
        if let Some(slot) = self.index.get_mut(&self.heap[j].0) {
            *slot = j;
        }
    }

    /// Move the item at `pos` towards the root while it precedes its parent.
    /// Returns the final slot.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.precedes(&self.heap[pos].1, &self.heap[parent].1) {
                break;
            }
            self.swap_slots(pos, parent);
            pos = parent;
        }
        pos
    }

    /// Move the item at `pos` towards the leaves while any child precedes it.
    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let (left, right) = (2 * pos + 1, 2 * pos + 2);
            let mut best = pos;
            if left < len && self.precedes(&self.heap[left].1, &self.heap[best].1) {
                best = left;
            }
            if right < len && self.precedes(&self.heap[right].1, &self.heap[best].1) {
                best = right;
            }
            if best == pos {
                break;
            }
            self.swap_slots(pos, best);
            pos = best;
        }
    }
}

#[test]
fn test_push_pop() {
    let mut q = PriorityQueue::min_first();
    assert_eq!(q.pop(), Err(QueueError::Empty));
    assert_eq!(q.top(), Err(QueueError::Empty));

    q.push("N", 1.0).unwrap();
    assert_eq!(q.top(), Ok(&"N"));
    assert_eq!(q.pop(), Ok("N"));
    assert_eq!(q.pop(), Err(QueueError::Empty));

    q.push("A", 1.0).unwrap();
    q.push("B", 2.0).unwrap();
    assert_eq!(q.pop(), Ok("A"));
    assert_eq!(q.pop(), Ok("B"));
    assert!(q.is_empty());

    q.push("X", 2.0).unwrap();
    q.push("Y", 1.0).unwrap();
    assert_eq!(q.pop(), Ok("Y"));
    assert_eq!(q.pop(), Ok("X"));
    assert!(q.is_empty());
}

#[test]
fn test_max_first() {
    let mut q = PriorityQueue::max_first();
    q.push(1, 10_u32).unwrap();
    q.push(2, 30).unwrap();
    q.push(3, 20).unwrap();
    assert_eq!(q.top(), Ok(&2));
    assert_eq!(q.pop(), Ok(2));
    assert_eq!(q.pop(), Ok(3));
    assert_eq!(q.pop(), Ok(1));

    let mut q = PriorityQueue::new(true);
    q.push('x', 0.5).unwrap();
    q.push('y', 2.5).unwrap();
    q.push('z', 1.5).unwrap();
    assert!(q.change_priority(&'x', 3.0));
    assert_eq!(q.pop(), Ok('x'));
    assert_eq!(q.pop(), Ok('y'));
    assert_eq!(q.pop(), Ok('z'));
}

#[test]
fn test_unique_elements() {
    let mut q = PriorityQueue::min_first();
    q.push('a', 1.0).unwrap();
    assert_eq!(q.push('a', 0.5), Err(QueueError::AlreadyQueued));
    assert_eq!(q.len(), 1);
    assert_eq!(q.priority(&'a'), Some(&1.0));

    // Once popped, the element may be pushed again
    assert_eq!(q.pop(), Ok('a'));
    assert!(!q.contains(&'a'));
    q.push('a', 3.0).unwrap();
    assert!(q.contains(&'a'));
}

#[test]
fn test_change_priority() {
    let mut q = PriorityQueue::min_first();
    q.push("X", 1.0).unwrap();
    q.push("Y", 3.0).unwrap();
    q.push("Z", 5.0).unwrap();

    // Decrease
    assert!(q.change_priority(&"Z", 0.5));
    assert_eq!(q.top(), Ok(&"Z"));
    assert_eq!(q.priority(&"Z"), Some(&0.5));
    assert!(q.contains(&"Z"));

    // Increase
    assert!(q.change_priority(&"Z", 4.0));
    assert_eq!(q.top(), Ok(&"X"));

    // Absent element is a no-op
    assert!(!q.change_priority(&"W", 0.0));
    assert!(!q.contains(&"W"));
    assert_eq!(q.len(), 3);

    assert_eq!(q.pop(), Ok("X"));
    assert_eq!(q.pop(), Ok("Y"));
    assert_eq!(q.pop(), Ok("Z"));
    assert_eq!(q.pop(), Err(QueueError::Empty));
}

#[test]
fn test_clear() {
    let mut q = PriorityQueue::min_first();
    q.push(1, 1.0).unwrap();
    q.push(2, 2.0).unwrap();
    q.clear();
    assert!(q.is_empty());
    assert!(!q.contains(&1));
    q.push(1, 5.0).unwrap();
    assert_eq!(q.len(), 1);
}

#[test]
fn test_random_operations() {
    use rand::{Rng, SeedableRng};
    use rand::rngs::SmallRng;

    // Reference model: plain list of (element, priority)
    fn reference_top(model: &[(u32, u32)], prefer_high: bool) -> Option<u32> {
        let best = if prefer_high {
            model.iter().map(|&(_, p)| p).max()
        } else {
            model.iter().map(|&(_, p)| p).min()
        }?;
        Some(best)
    }

    let mut rng = SmallRng::seed_from_u64(0x5eed_0f_a5_91);
    for &prefer_high in &[false, true] {
        let mut q = PriorityQueue::new(prefer_high);
        let mut model: Vec<(u32, u32)> = Vec::new();

        for _ in 0..2000 {
            match rng.gen_range(0, 3) {
                0 => {
                    let e = rng.gen_range(0, 64);
                    let p = rng.gen_range(0, 1000);
                    if model.iter().any(|&(x, _)| x == e) {
                        assert_eq!(q.push(e, p), Err(QueueError::AlreadyQueued));
                    } else {
                        q.push(e, p).unwrap();
                        model.push((e, p));
                    }
                }
                1 => {
                    let e = rng.gen_range(0, 64);
                    let p = rng.gen_range(0, 1000);
                    let present = model.iter().any(|&(x, _)| x == e);
                    assert_eq!(q.change_priority(&e, p), present);
                    if let Some(item) = model.iter_mut().find(|(x, _)| *x == e) {
                        item.1 = p;
                    }
                    assert_eq!(q.contains(&e), present);
                }
                _ => {
                    match reference_top(&model, prefer_high) {
                        None => assert_eq!(q.pop(), Err(QueueError::Empty)),
                        Some(best) => {
                            let e = q.pop().unwrap();
                            let pos = model.iter().position(|&(x, _)| x == e).expect("popped unknown element");
                            assert_eq!(model[pos].1, best);
                            model.swap_remove(pos);
                        }
                    }
                }
            }
            assert_eq!(q.len(), model.len());
        }
    }
}
