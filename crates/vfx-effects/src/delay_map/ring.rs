/// Fixed-capacity circular store of past frames.
///
/// All slots live in one contiguous allocation made at construction. Slot
/// `i` holds the frame written `(cursor - 1 - i) mod capacity` writes before
/// the newest one. Slots that were never written read as zeros.
#[derive(Debug, Clone)]
pub struct FrameRing {
    storage: Vec<u8>,
    frame_len: usize,
    capacity: usize,
    cursor: usize,
    frames_written: u64,
}

impl FrameRing {
    /// Allocate `capacity` slots of `frame_len` bytes each.
    pub fn new(frame_len: usize, capacity: usize) -> Result<Self, String> {
        if capacity == 0 {
            return Err("frame ring capacity must be at least 1".to_string());
        }
        let total = frame_len
            .checked_mul(capacity)
            .ok_or_else(|| format!("frame ring of {capacity} x {frame_len} bytes overflows"))?;
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(total)
            .map_err(|e| format!("cannot allocate {total} bytes of frame history: {e}"))?;
        storage.resize(total, 0);
        Ok(Self {
            storage,
            frame_len,
            capacity,
            cursor: 0,
            frames_written: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Index of the next slot to be overwritten.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Slot holding the most recently written frame. Before the first write
    /// this is the last slot, which still reads as zeros.
    pub fn latest_slot(&self) -> usize {
        (self.cursor + self.capacity - 1) % self.capacity
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// How many writes ago `slot` was filled, 0 being the newest frame.
    pub fn age_of(&self, slot: usize) -> usize {
        (self.latest_slot() + self.capacity - slot % self.capacity) % self.capacity
    }

    /// Copy `frame` into the cursor slot and advance the cursor.
    ///
    /// Returns the slot written. Zero-length frames and frames shorter than
    /// `frame_len` are ignored and leave the ring untouched.
    pub fn write(&mut self, frame: &[u8]) -> Option<usize> {
        if self.frame_len == 0 {
            return None;
        }
        let src = frame.get(..self.frame_len)?;
        let slot = self.cursor;
        let start = slot * self.frame_len;
        self.storage[start..start + self.frame_len].copy_from_slice(src);
        self.cursor = (self.cursor + 1) % self.capacity;
        self.frames_written += 1;
        Some(slot)
    }

    /// The frame stored at `slot`, or `None` if `slot` is out of range.
    pub fn read(&self, slot: usize) -> Option<&[u8]> {
        if slot >= self.capacity {
            return None;
        }
        let start = slot * self.frame_len;
        self.storage.get(start..start + self.frame_len)
    }

    /// One byte of one stored frame, addressed by slot and byte index
    /// within the frame.
    #[inline]
    pub fn sample(&self, slot: usize, index: usize) -> Option<u8> {
        if index >= self.frame_len {
            return None;
        }
        self.storage.get(slot.checked_mul(self.frame_len)?.checked_add(index)?).copied()
    }

    /// Zero every slot and rewind the cursor.
    pub fn clear(&mut self) {
        self.storage.fill(0);
        self.cursor = 0;
        self.frames_written = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(len: usize, value: u8) -> Vec<u8> {
        vec![value; len]
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(FrameRing::new(16, 0).is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(FrameRing::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_unallocatable_size_rejected() {
        // Fits in usize but exceeds isize::MAX, which no allocation can hold.
        assert!(FrameRing::new(1 << 62, 3).is_err());
    }

    #[test]
    fn test_write_advances_cursor() {
        let mut ring = FrameRing::new(4, 3).unwrap();
        assert_eq!(ring.write(&frame(4, 1)), Some(0));
        assert_eq!(ring.cursor(), 1);
        assert_eq!(ring.write(&frame(4, 2)), Some(1));
        assert_eq!(ring.write(&frame(4, 3)), Some(2));
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.write(&frame(4, 4)), Some(0));
        assert_eq!(ring.read(0), Some(&[4u8, 4, 4, 4][..]));
        assert_eq!(ring.frames_written(), 4);
    }

    #[test]
    fn test_roundtrip_exact_bytes() {
        let mut ring = FrameRing::new(8, 5).unwrap();
        let data: Vec<u8> = (10..18).collect();
        let slot = ring.write(&data).unwrap();
        assert_eq!(ring.read(slot).unwrap(), &data[..]);
    }

    #[test]
    fn test_read_is_idempotent() {
        let mut ring = FrameRing::new(8, 2).unwrap();
        ring.write(&(0..8).collect::<Vec<u8>>());
        let a = ring.read(0).unwrap().to_vec();
        let b = ring.read(0).unwrap().to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unwritten_slots_are_black() {
        let ring = FrameRing::new(4, 3).unwrap();
        for slot in 0..3 {
            assert!(ring.read(slot).unwrap().iter().all(|&b| b == 0));
        }
        assert!(ring.read(3).is_none());
    }

    #[test]
    fn test_short_and_empty_frames_ignored() {
        let mut ring = FrameRing::new(4, 2).unwrap();
        assert_eq!(ring.write(&[1, 2, 3]), None);
        assert_eq!(ring.cursor(), 0);

        let mut empty = FrameRing::new(0, 2).unwrap();
        assert_eq!(empty.write(&[1, 2, 3, 4]), None);
        assert_eq!(empty.frames_written(), 0);
    }

    #[test]
    fn test_ages() {
        let mut ring = FrameRing::new(1, 4).unwrap();
        for v in 0..4u8 {
            ring.write(&[v]);
        }
        // Cursor wrapped to 0, newest frame sits in slot 3.
        assert_eq!(ring.latest_slot(), 3);
        assert_eq!(ring.age_of(3), 0);
        assert_eq!(ring.age_of(2), 1);
        assert_eq!(ring.age_of(0), 3);
    }

    #[test]
    fn test_sample_bounds() {
        let mut ring = FrameRing::new(4, 2).unwrap();
        ring.write(&[1, 2, 3, 4]);
        assert_eq!(ring.sample(0, 2), Some(3));
        assert_eq!(ring.sample(0, 4), None);
        assert_eq!(ring.sample(2, 0), None);
        assert_eq!(ring.sample(usize::MAX, 0), None);
    }

    #[test]
    fn test_clear() {
        let mut ring = FrameRing::new(2, 2).unwrap();
        ring.write(&[9, 9]);
        ring.clear();
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.frames_written(), 0);
        assert_eq!(ring.read(0), Some(&[0u8, 0][..]));
    }
}
