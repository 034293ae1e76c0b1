//! # Scene Engine
//!
//! An interactive 3D scene renderer and simulator. The engine keeps a scene
//! of entities (models, lights, particles), advances a physics step each
//! frame, and renders the scene through a sequence of passes (sky, opaque
//! meshes, debug wireframes, reflections) by batching all visible model
//! instances into shared vertex/index buffers drawn with indexed sub-range
//! draws.
//!
//! ## Modules
//!
//! - `foundation`: math utilities, seeded randomness, frame timing
//! - `geometry`: plane/ray/AABB value types with intersection queries
//! - `voxel`: chunk indexing and the surface-net crossed-edge table
//! - `assets`: Wavefront OBJ loading and the shared mesh cache
//! - `scene`: entity registry, model instances, world batching, simulation
//! - `physics`: rigid bodies and the interior containment collider
//! - `render`: cameras, lights, render passes and frame orchestration
//! - `input`: input-state snapshot fed by the windowing collaborator
//! - `core`: unified configuration
//!
//! The GPU and the window are external collaborators: the engine only talks
//! to them through [`render::GraphicsDevice`] and [`input::WindowEvent`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let mut scene = Scene::new(&config);
//!     let mut renderer = Renderer::new();
//!     let mut device = RecordingDevice::default();
//!
//!     scene.spawn_particle();
//!     scene.simulate(1.0 / 60.0);
//!     renderer.render_frame(&mut device, &mut scene);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod core;
pub mod foundation;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod voxel;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, MeshLibrary, ObjLoader},
        core::config::{AppConfig, ConfigError},
        foundation::{
            math::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4},
            rng::Rng,
            time::Timer,
        },
        geometry::{Aabb, Plane, Ray},
        input::{InputState, KeyCode, MouseButton, WindowEvent},
        physics::{Body, InteriorBox},
        render::{
            Camera, GraphicsDevice, Light, LightKind, Mesh, RecordingDevice, RenderPass, Renderer,
        },
        scene::{Entity, Model, Registry, Scene, WorldBatch},
    };
}
