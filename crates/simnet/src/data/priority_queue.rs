use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    priority: f64,
}

/// Min-priority queue over string keys with decrease-key.
///
/// A binary heap plus a key-to-slot index. Comparisons are strict, so for a fixed sequence of
/// operations the extraction order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    heap: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.heap.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Current priority of `key`, or `None` once it was removed (or never added).
    pub fn priority(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&i| self.heap[i].priority)
    }

    /// Key with the lowest priority, without removing it.
    pub fn min(&self) -> Option<&str> {
        self.heap.first().map(|e| e.key.as_str())
    }

    /// Inserts `key`. Returns `false` and leaves the queue untouched if `key` is already queued.
    pub fn add(&mut self, key: impl Into<String>, priority: f64) -> bool {
        let key = key.into();
        if self.index.contains_key(&key) {
            return false;
        }
        let slot = self.heap.len();
        self.index.insert(key.clone(), slot);
        self.heap.push(Entry { key, priority });
        self.sift_up(slot);
        true
    }

    /// Removes and returns the key with the lowest priority.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn remove_min(&mut self) -> String {
        assert!(!self.heap.is_empty(), "queue underflow");
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let Some(min) = self.heap.pop() else {
            unreachable!("heap checked non-empty above")
        };
        self.index.remove(&min.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        min.key
    }

    /// Lowers the priority of a queued key.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not queued or `priority` is greater than its current priority.
    pub fn decrease(&mut self, key: &str, priority: f64) {
        let Some(&slot) = self.index.get(key) else {
            panic!("key not found: {key}");
        };
        let current = self.heap[slot].priority;
        assert!(
            priority <= current,
            "new priority {priority} is greater than current priority {current} for key {key}"
        );
        self.heap[slot].priority = priority;
        self.sift_up(slot);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].priority < self.heap[parent].priority {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < self.heap.len() && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].priority < self.heap[smallest].priority
            {
                smallest = right;
            }
            if smallest == slot {
                return;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.index.insert(self.heap[a].key.clone(), a);
        self.index.insert(self.heap[b].key.clone(), b);
    }
}
