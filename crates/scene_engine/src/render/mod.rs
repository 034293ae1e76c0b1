//! Rendering: cameras, lights, passes, and frame orchestration
//!
//! The engine renders by flattening all visible model instances into a
//! shared buffer pair (see [`crate::scene::WorldBatch`]) and replaying the
//! scene's render passes against a [`GraphicsDevice`] backend: reflections
//! first into their offscreen target, then the main pass with sky, meshes,
//! and the debug overlay.

mod camera;
mod debug_draw;
mod device;
pub mod lighting;
mod mesh;
mod pass;
mod renderer;

pub use camera::{Camera, Projection};
pub use debug_draw::DebugLines;
pub use device::{BufferHandle, DeviceCall, GraphicsDevice, RecordingDevice, TargetHandle};
pub use lighting::{Light, LightKind};
pub use mesh::Mesh;
pub use pass::{PassCamera, PassStages, PassTarget, RenderPass};
pub use renderer::Renderer;
