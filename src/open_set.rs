use crate::cell::CellId;
use fxhash::FxHashMap;
use ordered_float::OrderedFloat;

#[derive(Clone, Copy, Debug)]
struct HeapEntry {
    id: CellId,
    f_cost: OrderedFloat<f64>,
    h_cost: OrderedFloat<f64>,
    seq: u64,
}

impl HeapEntry {
    // Orders per f cost, then creates a subordering based on h cost,
    // favouring cells closest to the goal; the insertion sequence keeps
    // full ties stable.
    fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>, u64) {
        (self.f_cost, self.h_cost, self.seq)
    }
}

/// The open set of a search: a binary min-heap of discovered, not-yet-expanded
/// cells ordered by (f cost, h cost, insertion order). A cell -> slot index is
/// kept alongside the heap so membership is O(1) and re-keying an already
/// queued cell repositions its live entry in O(log n) instead of leaving a
/// stale one behind.
#[derive(Clone, Debug, Default)]
pub struct OpenSet {
    heap: Vec<HeapEntry>,
    slots: FxHashMap<CellId, usize>,
    next_seq: u64,
}

impl OpenSet {
    pub fn new() -> OpenSet {
        OpenSet::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: &CellId) -> bool {
        self.slots.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
        self.next_seq = 0;
    }

    /// Queues a cell under the given keys. The cell must not be queued yet;
    /// use [update](Self::update) to re-key a queued cell.
    pub fn push(&mut self, id: CellId, f_cost: f64, h_cost: f64) {
        debug_assert!(!self.contains(&id), "cell {id} is already queued");
        let entry = HeapEntry {
            id,
            f_cost: OrderedFloat(f_cost),
            h_cost: OrderedFloat(h_cost),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let slot = self.heap.len();
        self.heap.push(entry);
        self.slots.insert(id, slot);
        self.sift_up(slot);
    }

    /// Removes and returns the minimal cell, or [None] if the set is empty.
    pub fn pop_min(&mut self) -> Option<CellId> {
        let last = self.heap.len().checked_sub(1)?;
        self.heap.swap(0, last);
        let entry = self.heap.pop()?;
        self.slots.remove(&entry.id);
        if let Some(root) = self.heap.first() {
            self.slots.insert(root.id, 0);
            self.sift_down(0);
        }
        Some(entry.id)
    }

    /// Re-keys a queued cell and restores heap order before the next pop.
    pub fn update(&mut self, id: &CellId, f_cost: f64, h_cost: f64) {
        let Some(&slot) = self.slots.get(id) else {
            debug_assert!(false, "update of unqueued cell {id}");
            return;
        };
        self.heap[slot].f_cost = OrderedFloat(f_cost);
        self.heap[slot].h_cost = OrderedFloat(h_cost);
        self.sift_up(slot);
        if let Some(&slot) = self.slots.get(id) {
            self.sift_down(slot);
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].key() < self.heap[b].key()
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].id, a);
        self.slots.insert(self.heap[b].id, b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap_entries(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let mut smallest = slot;
            for child in [2 * slot + 1, 2 * slot + 2] {
                if child < self.heap.len() && self.less(child, smallest) {
                    smallest = child;
                }
            }
            if smallest == slot {
                break;
            }
            self.swap_entries(slot, smallest);
            slot = smallest;
        }
    }
}
