use serde::Serialize;

use crate::{Error, Result};

/// A [binary min-heap](https://en.wikipedia.org/wiki/Binary_heap) over a flat vector.
///
/// For every index `i`, the key at `i` is no greater than the keys at `2i + 1` and `2i + 2`.
/// Equal keys are allowed and may come out in any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MinHeap<T> {
    heap: Vec<T>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self { heap: vec![] }
    }
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Backing storage in heap order.
    pub fn as_slice(&self) -> &[T] {
        &self.heap
    }

    pub fn into_vec(self) -> Vec<T> {
        self.heap
    }

    pub fn peek_min(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Append `key` and sift it up past every larger parent. O(log n).
    pub fn insert(&mut self, key: T) {
        self.heap.push(key);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the smallest key. O(log n).
    ///
    /// Fails with [`Error::EmptyHeap`] when there is nothing to extract, leaving the heap as it was.
    pub fn extract_min(&mut self) -> Result<T> {
        let last = self.heap.pop().ok_or(Error::EmptyHeap)?;
        if self.heap.is_empty() {
            return Ok(last);
        }
        let root = std::mem::replace(&mut self.heap[0], last);
        self.sift_down(0);
        Ok(root)
    }

    /// Drain the heap in non-decreasing order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Ok(key) = self.extract_min() {
            sorted.push(key);
        }
        sorted
    }

    /// Rows of the implicit binary tree, root first. The last row may be partial.
    pub fn levels(&self) -> Vec<&[T]> {
        let mut levels = vec![];
        let mut start = 0;
        let mut width = 1;
        while start < self.heap.len() {
            let end = (start + width).min(self.heap.len());
            levels.push(&self.heap[start..end]);
            start = end;
            width *= 2;
        }
        levels
    }

    fn sift_up(&mut self, mut i: usize) {
        while i != 0 && self.heap[parent(i)] > self.heap[i] {
            self.heap.swap(i, parent(i));
            i = parent(i);
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let mut smallest = i;
            // Strict comparisons so the left child wins a tie with the right
            if left(i) < self.heap.len() && self.heap[left(i)] < self.heap[smallest] {
                smallest = left(i);
            }
            if right(i) < self.heap.len() && self.heap[right(i)] < self.heap[smallest] {
                smallest = right(i);
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T: Ord> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

/// [Heapsort](https://en.wikipedia.org/wiki/Heapsort) by repeated insertion then repeated extraction.
pub fn heap_sort<T: Ord>(keys: impl IntoIterator<Item = T>) -> Vec<T> {
    keys.into_iter().collect::<MinHeap<_>>().into_sorted_vec()
}
