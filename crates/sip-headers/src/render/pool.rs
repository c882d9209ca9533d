//! Reusable output buffers for header rendering.
//!
//! Rendering a header writes into a `String` taken from a [`BufferPool`].
//! The buffer is handed out behind a [`PooledBuffer`] guard that clears it
//! and puts it back when dropped, so every exit path (early return, error,
//! unwinding panic) returns it.
//!
//! The pool absorbs the growth of the working buffer. `render` and
//! `render_value` still copy the finished text out once at its final length;
//! code that owns a sink should call `render_to` and skip that copy.

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

/// Pool sizing configuration
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    /// Buffers allocated up front
    pub initial_size: usize,
    /// Maximum number of idle buffers kept in the pool
    pub max_size: usize,
    /// Buffers that grew beyond this capacity are dropped instead of pooled
    pub max_retained_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_size: 16,
            max_size: 64,
            max_retained_capacity: 8 * 1024,
        }
    }
}

/// Pool of reusable `String` buffers
#[derive(Debug)]
pub struct BufferPool {
    buffers: Mutex<Vec<String>>,
    config: PoolConfig,
}

impl BufferPool {
    /// Creates a pool, pre-allocating `initial_size` buffers
    pub fn new(config: PoolConfig) -> Self {
        let initial = config.initial_size.min(config.max_size);
        let capacity = config.max_retained_capacity.min(128);
        let buffers = (0..initial).map(|_| String::with_capacity(capacity)).collect();
        Self {
            buffers: Mutex::new(buffers),
            config,
        }
    }

    /// Takes a buffer from the pool, allocating a fresh one if it is empty
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self.buffers.lock().pop().unwrap_or_default();
        PooledBuffer { buf, pool: self }
    }

    /// Number of idle buffers currently held
    pub fn idle(&self) -> usize {
        self.buffers.lock().len()
    }

    /// Runs `f` with a pooled buffer; the buffer is returned before this
    /// function returns.
    pub fn with_buffer<R>(&self, f: impl FnOnce(&mut String) -> R) -> R {
        let mut guard = self.acquire();
        f(&mut guard)
    }

    fn release(&self, mut buf: String) {
        if buf.capacity() > self.config.max_retained_capacity {
            return;
        }
        buf.clear();
        let mut buffers = self.buffers.lock();
        if buffers.len() < self.config.max_size {
            buffers.push(buf);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

/// RAII guard around a pooled buffer
///
/// The guard borrows its pool, so the buffer cannot outlive it.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    buf: String,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

static GLOBAL_POOL: OnceLock<BufferPool> = OnceLock::new();

/// Process-wide pool used by the rendering entry points
pub fn global_pool() -> &'static BufferPool {
    GLOBAL_POOL.get_or_init(BufferPool::default)
}

/// Runs `f` with a buffer from the global pool
pub fn with_buffer<R>(f: impl FnOnce(&mut String) -> R) -> R {
    global_pool().with_buffer(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_pool() -> BufferPool {
        BufferPool::new(PoolConfig {
            initial_size: 2,
            max_size: 2,
            max_retained_capacity: 256,
        })
    }

    #[test]
    fn test_buffer_returned_on_drop() {
        let pool = small_pool();
        assert_eq!(pool.idle(), 2);
        {
            let mut buf = pool.acquire();
            buf.push_str("Via: SIP/2.0/UDP host");
            assert_eq!(pool.idle(), 1);
        }
        assert_eq!(pool.idle(), 2);
        // Returned buffers come back cleared
        let buf = pool.acquire();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_buffer_returned_on_early_exit() {
        let pool = small_pool();
        let result: Result<(), String> = pool.with_buffer(|buf| {
            buf.push_str("partial");
            Err("render failed".to_string())
        });
        assert!(result.is_err());
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_buffer_returned_on_panic() {
        let pool = small_pool();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pool.with_buffer(|buf| {
                buf.push_str("x");
                panic!("boom");
            })
        }));
        assert!(outcome.is_err());
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_oversized_buffers_are_not_retained() {
        let pool = small_pool();
        {
            let mut buf = pool.acquire();
            buf.push_str(&"a".repeat(1024));
        }
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_pool_never_exceeds_max_size() {
        let pool = small_pool();
        let a = pool.acquire();
        let b = pool.acquire();
        let c = pool.acquire();
        drop(a);
        drop(b);
        drop(c);
        assert_eq!(pool.idle(), 2);
    }
}
