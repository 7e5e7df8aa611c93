/// Bounded LIFO of pixel coordinates.
///
/// Capacity is fixed at construction (the pixel count of the tracked raster).
/// The stack does not reject duplicates; callers push a pixel only when they
/// change its occupancy, which bounds the live entries by the pixel count.
#[derive(Debug, Clone)]
pub struct CandidateStack {
    items: Vec<(u32, u32)>,
    capacity: usize,
}

impl CandidateStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Panics when the stack is full.
    #[inline]
    pub fn push(&mut self, x: usize, y: usize) {
        assert!(
            self.items.len() < self.capacity,
            "candidate stack overflow: capacity {} exhausted pushing ({x}, {y})",
            self.capacity
        );
        self.items.push((x as u32, y as u32));
    }

    #[inline]
    pub fn pop(&mut self) -> Option<(usize, usize)> {
        self.items.pop().map(widen)
    }

    pub fn last(&self) -> Option<(usize, usize)> {
        self.items.last().copied().map(widen)
    }

    pub fn get(&self, i: usize) -> Option<(usize, usize)> {
        self.items.get(i).copied().map(widen)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.items.iter().copied().map(widen)
    }

    pub fn clear(&mut self) {
        self.items.clear();
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
}

#[inline]
fn widen((x, y): (u32, u32)) -> (usize, usize) {
    (x as usize, y as usize)
}
