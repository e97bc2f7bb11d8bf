/// Slots reserved by `MinHeap::new`
const DEFAULT_CAPACITY: usize = 100;

/// Binary min-heap.
///
/// Positions follow the classic 1-indexed layout (parent of `i` is `i / 2`,
/// children are `2i` and `2i + 1`); the backing vector stores position `i`
/// at index `i - 1`. Capacity doubles whenever an insert finds the heap full.
///
/// There is no decrease-key. Callers that need to lower a priority push a
/// second entry and discard the stale one when it is extracted later.
#[derive(Clone, Debug)]
pub struct MinHeap<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        MinHeap {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert and percolate up
    pub fn insert(&mut self, value: T) {
        if self.items.len() >= self.capacity {
            self.grow();
        }
        self.items.push(value);
        self.percolate_up(self.items.len());
    }

    /// Remove and return the smallest element
    pub fn extract_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();
        if !self.items.is_empty() {
            self.percolate_down(1);
        }
        min
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn grow(&mut self) {
        self.capacity *= 2;
        self.items.reserve_exact(self.capacity - self.items.len());
    }

    // Positions below are 1-indexed
    fn less(&self, a: usize, b: usize) -> bool {
        self.items[a - 1] < self.items[b - 1]
    }

    fn percolate_up(&mut self, mut pos: usize) {
        while pos > 1 && self.less(pos, pos / 2) {
            self.items.swap(pos - 1, pos / 2 - 1);
            pos /= 2;
        }
    }

    fn percolate_down(&mut self, mut pos: usize) {
        let size = self.items.len();
        while 2 * pos <= size {
            let mut smallest = 2 * pos;
            if smallest < size && self.less(smallest + 1, smallest) {
                smallest += 1;
            }
            if !self.less(smallest, pos) {
                break;
            }
            self.items.swap(pos - 1, smallest - 1);
            pos = smallest;
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
