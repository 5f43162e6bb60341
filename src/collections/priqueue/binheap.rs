// Copyright (c) 2016, 2017, 2020, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Binary heap implementation

use crate::collections::ItemPriQueue;

use std::cmp::Ordering;

/// Heap item information.
struct BinHeapItem<K, V> {
    /// The key associated with this item.
    key: K,
    /// The value (priority) of the item.
    value: V,
    /// Insertion counter, breaks ties between equal values.
    seq: u64,
}

impl<K, V> BinHeapItem<K, V>
where
    V: PartialOrd,
{
    fn precedes(&self, other: &Self) -> bool {
        match self.value.partial_cmp(&other.value) {
            Some(Ordering::Less) => true,
            Some(Ordering::Greater) => false,
            _ => self.seq < other.seq,
        }
    }
}

/// Simple stable binary heap data structure.
///
/// Items with equal values are returned in the order they have been pushed.
///
/// # Example
///
/// ```
/// use rs_graph_steps::collections::{BinHeap, ItemPriQueue};
///
/// let mut heap = BinHeap::new();
/// heap.push('a', 3);
/// heap.push('b', 1);
/// heap.push('c', 3);
/// heap.push('d', 1);
///
/// let order: Vec<_> = std::iter::from_fn(|| heap.pop_min()).map(|(k, _)| k).collect();
/// assert_eq!(order, vec!['b', 'd', 'a', 'c']);
/// ```
pub struct BinHeap<K, V> {
    /// The heap elements.
    heap: Vec<BinHeapItem<K, V>>,
    /// Sequence number of the next pushed element.
    nextseq: u64,
}

impl<K, V> BinHeap<K, V> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<K, V> Default for BinHeap<K, V> {
    fn default() -> Self {
        BinHeap {
            heap: vec![],
            nextseq: 0,
        }
    }
}

impl<K, V> ItemPriQueue<K, V> for BinHeap<K, V>
where
    V: PartialOrd,
{
    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.nextseq = 0;
    }

    fn push(&mut self, key: K, value: V) {
        self.heap.push(BinHeapItem {
            key,
            value,
            seq: self.nextseq,
        });
        self.nextseq += 1;
        self.upheap(self.heap.len() - 1);
    }

    fn pop_min(&mut self) -> Option<(K, V)> {
        if self.heap.is_empty() {
            return None;
        }

        // move the smallest element to the end and remove it
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let min_item = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.downheap(0);
        }
        Some((min_item.key, min_item.value))
    }
}

impl<K, V> BinHeap<K, V>
where
    V: PartialOrd,
{
    /// Move the element at position `cur_pos` up in the heap until its parent
    /// precedes it or the root node is reached.
    fn upheap(&mut self, mut cur_pos: usize) {
        while cur_pos > 0 {
            let parent_pos = (cur_pos - 1) / 2;
            if !self.heap[cur_pos].precedes(&self.heap[parent_pos]) {
                break;
            }
            self.heap.swap(cur_pos, parent_pos);
            cur_pos = parent_pos;
        }
    }

    /// Move the element at position `cur_pos` down in the heap until it
    /// precedes both children.
    fn downheap(&mut self, mut cur_pos: usize) {
        let n = self.heap.len();
        loop {
            let left_pos = 2 * cur_pos + 1;
            let right_pos = left_pos + 1;
            let next_pos = if left_pos >= n {
                break;
            } else if right_pos < n && self.heap[right_pos].precedes(&self.heap[left_pos]) {
                right_pos
            } else {
                left_pos
            };

            if !self.heap[next_pos].precedes(&self.heap[cur_pos]) {
                break;
            }

            self.heap.swap(cur_pos, next_pos);
            cur_pos = next_pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BinHeap;
    use crate::collections::ItemPriQueue;

    fn drain<K, V: PartialOrd>(heap: &mut BinHeap<K, V>) -> Vec<(K, V)> {
        std::iter::from_fn(|| heap.pop_min()).collect()
    }

    #[test]
    fn test_sorted_output() {
        let mut heap = BinHeap::new();
        for (i, &v) in [5, 3, 9, 1, 7, 2, 8, 6, 4, 0].iter().enumerate() {
            heap.push(i, v);
        }
        assert_eq!(heap.len(), 10);
        let values: Vec<_> = drain(&mut heap).into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, (0..10).collect::<Vec<_>>());
        assert!(heap.is_empty());
    }

    #[test]
    fn test_stable_ties() {
        let mut heap = BinHeap::new();
        let values = [2, 1, 2, 1, 2, 1, 0, 2, 1, 0];
        for (i, &v) in values.iter().enumerate() {
            heap.push(i, v);
        }
        let keys: Vec<_> = drain(&mut heap).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![6, 9, 1, 3, 5, 8, 0, 2, 4, 7]);
    }

    #[test]
    fn test_interleaved() {
        let mut heap = BinHeap::new();
        heap.push("a", 4);
        heap.push("b", 2);
        assert_eq!(heap.pop_min(), Some(("b", 2)));
        heap.push("c", 4);
        heap.push("a", 1);
        assert_eq!(heap.pop_min(), Some(("a", 1)));
        assert_eq!(heap.pop_min(), Some(("a", 4)));
        assert_eq!(heap.pop_min(), Some(("c", 4)));
        assert_eq!(heap.pop_min(), None);

        heap.push("x", 1);
        heap.clear();
        assert!(heap.is_empty());
    }
}
