//! Rendering options and pooled output buffers

pub mod pool;

pub use pool::{global_pool, with_buffer, BufferPool, PoolConfig, PooledBuffer};

/// Options controlling how headers (and embedded URIs) are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Use the compact header name (`v`, `f`, `i`, ...) where one exists
    pub compact: bool,
    /// Write an explicit `q=1` on accept-style entries that carry no `q`
    pub default_q: bool,
}

impl RenderOptions {
    /// Options for compact-form rendering
    pub fn compact() -> Self {
        Self {
            compact: true,
            ..Self::default()
        }
    }
}
