//! GPU device collaborator interface
//!
//! The engine never talks to a graphics API directly; everything it needs
//! from the GPU is behind [`GraphicsDevice`]: allocating and filling
//! buffers, binding render targets, and issuing indexed draws with a byte
//! offset. All calls are side-effecting and assumed to succeed — GPU error
//! handling belongs to the implementing backend.

/// Opaque GPU buffer handle
pub type BufferHandle = u32;

/// Opaque render target (framebuffer) handle
pub type TargetHandle = u32;

/// The surface the engine requires from a GPU backend
pub trait GraphicsDevice {
    /// Allocate a buffer and return its handle
    fn create_buffer(&mut self) -> BufferHandle;

    /// Replace a buffer's contents with the given bytes
    fn upload(&mut self, buffer: BufferHandle, bytes: &[u8]);

    /// Allocate an offscreen render target
    fn create_target(&mut self) -> TargetHandle;

    /// Bind a render target; `None` binds the default framebuffer
    fn bind_target(&mut self, target: Option<TargetHandle>);

    /// Select the vertex/index buffer pair for subsequent draws
    fn bind_buffers(&mut self, vertex: BufferHandle, index: BufferHandle);

    /// Draw `count` indexed elements (`u32` indices) starting at the given
    /// byte offset into the bound index buffer
    fn draw_indexed(&mut self, count: i32, byte_offset: usize);
}

/// One recorded [`GraphicsDevice`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    /// A buffer was allocated
    CreateBuffer(BufferHandle),
    /// A buffer was filled with this many bytes
    Upload {
        /// Which buffer
        buffer: BufferHandle,
        /// Uploaded payload size
        len: usize,
    },
    /// A render target was allocated
    CreateTarget(TargetHandle),
    /// A render target (or the default framebuffer) was bound
    BindTarget(Option<TargetHandle>),
    /// A vertex/index buffer pair was bound
    BindBuffers {
        /// Vertex buffer
        vertex: BufferHandle,
        /// Index buffer
        index: BufferHandle,
    },
    /// An indexed draw was issued
    DrawIndexed {
        /// Element count
        count: i32,
        /// Byte offset into the index buffer
        byte_offset: usize,
    },
}

/// A device that records every call instead of touching a GPU.
///
/// Used by tests and headless runs to observe the exact command stream the
/// engine produces.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    next_handle: u32,
    /// Every call made so far, in order
    pub calls: Vec<DeviceCall>,
}

impl RecordingDevice {
    /// Number of draw calls recorded so far
    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::DrawIndexed { .. }))
            .count()
    }

    /// Forget all recorded calls, keeping allocated handles valid
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_buffer(&mut self) -> BufferHandle {
        self.next_handle += 1;
        self.calls.push(DeviceCall::CreateBuffer(self.next_handle));
        self.next_handle
    }

    fn upload(&mut self, buffer: BufferHandle, bytes: &[u8]) {
        self.calls.push(DeviceCall::Upload {
            buffer,
            len: bytes.len(),
        });
    }

    fn create_target(&mut self) -> TargetHandle {
        self.next_handle += 1;
        self.calls.push(DeviceCall::CreateTarget(self.next_handle));
        self.next_handle
    }

    fn bind_target(&mut self, target: Option<TargetHandle>) {
        self.calls.push(DeviceCall::BindTarget(target));
    }

    fn bind_buffers(&mut self, vertex: BufferHandle, index: BufferHandle) {
        self.calls.push(DeviceCall::BindBuffers { vertex, index });
    }

    fn draw_indexed(&mut self, count: i32, byte_offset: usize) {
        self.calls.push(DeviceCall::DrawIndexed { count, byte_offset });
    }
}
