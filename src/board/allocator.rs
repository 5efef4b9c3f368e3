//! Channel buffer allocator
//!
//! Channel buffers are carved from one fixed pool in the order ports are
//! dispatched. Nothing is ever freed: channels live until reset.

use brain_board_core::ports::ChannelBuffer;

/// Size of the channel buffer pool (bytes)
pub const CHANNEL_POOL_LEN: u32 = 4096;

/// Buffer start alignment (bytes)
const ALIGN: u32 = 4;

/// The pool cannot fit a requested buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolExhausted {
    /// Bytes requested
    pub requested: u16,
    /// Bytes left when the request was made
    pub available: u32,
}

/// Bump allocator over the channel buffer pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferPool {
    capacity: u32,
    used: u32,
}

impl BufferPool {
    /// Create an empty pool of `capacity` bytes
    pub const fn new(capacity: u32) -> Self {
        Self { capacity, used: 0 }
    }

    /// Allocate a buffer of `len` bytes
    ///
    /// A zero length asks for no buffer and returns `Ok(None)` without
    /// consuming pool space.
    pub fn alloc(&mut self, len: u16) -> Result<Option<ChannelBuffer>, PoolExhausted> {
        if len == 0 {
            return Ok(None);
        }

        let offset = self.used.next_multiple_of(ALIGN);
        let end = offset + u32::from(len);
        if end > self.capacity {
            return Err(PoolExhausted {
                requested: len,
                available: self.available(),
            });
        }

        self.used = end;
        Ok(Some(ChannelBuffer { offset, len }))
    }

    /// Bytes handed out so far, including alignment padding
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Bytes left
    pub fn available(&self) -> u32 {
        self.capacity - self.used
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(CHANNEL_POOL_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_is_no_buffer() {
        let mut pool = BufferPool::default();
        assert_eq!(pool.alloc(0), Ok(None));
        assert_eq!(pool.used(), 0);
    }

    #[test]
    fn test_allocation_order_and_alignment() {
        let mut pool = BufferPool::default();
        let a = pool.alloc(65).unwrap().unwrap();
        let b = pool.alloc(12).unwrap().unwrap();
        let c = pool.alloc(1).unwrap().unwrap();

        assert_eq!(a, ChannelBuffer { offset: 0, len: 65 });
        assert_eq!(b, ChannelBuffer { offset: 68, len: 12 });
        assert_eq!(c, ChannelBuffer { offset: 80, len: 1 });
        assert_eq!(pool.used(), 81);
    }

    #[test]
    fn test_exhaustion() {
        let mut pool = BufferPool::new(600);
        assert!(pool.alloc(512).unwrap().is_some());
        assert_eq!(
            pool.alloc(512),
            Err(PoolExhausted {
                requested: 512,
                available: 88
            })
        );
        // a failed request consumes nothing
        assert_eq!(pool.used(), 512);
        assert!(pool.alloc(88).unwrap().is_some());
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_pool_fits_every_channel() {
        // every stream buffer at once
        let lens = [512, 512, 32, 16, 65, 12, 65, 65, 65, 12, 128, 128, 16, 16, 128, 40];
        let mut pool = BufferPool::default();
        for len in lens {
            assert!(pool.alloc(len).unwrap().is_some());
        }
    }
}
