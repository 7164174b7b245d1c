//! Fixed-capacity ring buffer of frames.

use super::Frame;

/// Bounded frame log; once full, each push overwrites the oldest slot
#[derive(Debug, Clone)]
pub struct FrameRing {
    slots: Vec<Frame>,
    capacity: usize,
    /// Index of the oldest frame once the ring has wrapped
    head: usize,
    evictions: u64,
}

impl FrameRing {
    /// Create an empty ring; a capacity of zero is treated as one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
            evictions: 0,
        }
    }

    /// Append a frame, evicting the oldest when full
    pub fn push(&mut self, frame: Frame) {
        if self.slots.len() < self.capacity {
            self.slots.push(frame);
        } else {
            self.slots[self.head] = frame;
            self.head = (self.head + 1) % self.capacity;
            self.evictions += 1;
        }
    }

    /// Frames in push order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Copy of the frames in push order
    pub fn snapshot(&self) -> Vec<Frame> {
        self.iter().copied().collect()
    }

    /// Drop all frames, keeping the allocation
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frames overwritten since creation
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(f_cnt: u32) -> Frame {
        Frame::new(f_cnt, 5.0, 1)
    }

    fn counters(ring: &FrameRing) -> Vec<u32> {
        ring.iter().map(|f| f.f_cnt).collect()
    }

    #[test]
    fn test_push_below_capacity() {
        let mut ring = FrameRing::new(4);
        for i in 1..=3 {
            ring.push(frame(i));
        }
        assert_eq!(counters(&ring), vec![1, 2, 3]);
        assert_eq!(ring.evictions(), 0);
    }

    #[test]
    fn test_wraps_oldest_first() {
        let mut ring = FrameRing::new(3);
        for i in 1..=7 {
            ring.push(frame(i));
        }
        assert_eq!(counters(&ring), vec![5, 6, 7]);
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.evictions(), 4);
    }

    #[test]
    fn test_clear_resets_order() {
        let mut ring = FrameRing::new(2);
        for i in 1..=3 {
            ring.push(frame(i));
        }
        ring.clear();
        assert!(ring.is_empty());
        ring.push(frame(10));
        ring.push(frame(11));
        assert_eq!(counters(&ring), vec![10, 11]);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut ring = FrameRing::new(0);
        ring.push(frame(1));
        ring.push(frame(2));
        assert_eq!(ring.capacity(), 1);
        assert_eq!(ring.snapshot(), vec![frame(2)]);
    }
}
