//! Render pass descriptors

use bitflags::bitflags;

use crate::scene::BatchSlot;

bitflags! {
    /// Which stages a render pass executes
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PassStages: u32 {
        /// Sky background
        const SKY = 1 << 0;
        /// Batched opaque meshes
        const MESHES = 1 << 1;
        /// Debug wireframe overlay
        const DEBUG = 1 << 2;
    }
}

/// Which camera a pass renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassCamera {
    /// The scene's main camera
    Main,
    /// The main camera mirrored across the reflective surface
    Reflection,
}

/// Which target a pass renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassTarget {
    /// The default framebuffer
    Default,
    /// The offscreen reflection texture
    Reflection,
}

/// One render pass: a target, a camera, the stages to run, and an object
/// mask choosing which batched instances the mesh stage draws.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    /// Camera used for this pass
    pub camera: PassCamera,
    /// Target framebuffer
    pub target: PassTarget,
    /// Stages to execute
    pub stages: PassStages,
    /// Batched instances to draw; `None` draws every instance
    pub mask: Option<Vec<BatchSlot>>,
}

impl RenderPass {
    /// A pass over all instances with the given camera, target, and stages
    pub fn new(camera: PassCamera, target: PassTarget, stages: PassStages) -> Self {
        Self {
            camera,
            target,
            stages,
            mask: None,
        }
    }
}
