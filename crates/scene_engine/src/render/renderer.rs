//! Frame orchestration
//!
//! The renderer owns the GPU-side buffers and replays the scene's render
//! passes each frame. Mesh geometry is only re-uploaded when the batched
//! instance set changed; transforms and lights go up every frame.

use super::debug_draw::DebugLines;
use super::device::{BufferHandle, GraphicsDevice, TargetHandle};
use super::pass::{PassCamera, PassStages, PassTarget};
use crate::foundation::math::Vec3;
use crate::scene::Scene;

/// GPU handles held across frames
struct GpuState {
    mesh_vertices: BufferHandle,
    mesh_indices: BufferHandle,
    transforms: BufferHandle,
    lights: BufferHandle,
    frame_uniforms: BufferHandle,
    sky_vertices: BufferHandle,
    sky_indices: BufferHandle,
    wire_vertices: BufferHandle,
    wire_colors: BufferHandle,
    wire_indices: BufferHandle,
    reflection: TargetHandle,
}

/// Owns GPU buffers and issues the per-pass draw sequence
pub struct Renderer {
    /// Current aspect ratio of the output surface
    pub aspect: f32,
    /// Whether the debug wireframe overlay is drawn
    pub debug_enabled: bool,
    debug: DebugLines,
    gpu: Option<GpuState>,
    geometry_valid: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer; GPU resources are allocated on the first frame
    pub fn new() -> Self {
        Self {
            aspect: 16.0 / 9.0,
            debug_enabled: false,
            debug: DebugLines::new(),
            gpu: None,
            geometry_valid: false,
        }
    }

    /// Update the output aspect ratio after a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Render one frame of the scene.
    ///
    /// Rebuilds the world batch if the instance set changed, refreshes the
    /// per-frame buffers, then walks the scene's render passes in order.
    pub fn render_frame(&mut self, device: &mut dyn GraphicsDevice, scene: &mut Scene) {
        let geometry_changed = scene.update_batch();

        let gpu = &*self
            .gpu
            .get_or_insert_with(|| Self::create_gpu_state(device));

        if geometry_changed || !self.geometry_valid {
            device.upload(gpu.mesh_vertices, scene.batch().vertex_bytes());
            device.upload(gpu.mesh_indices, scene.batch().index_bytes());
            self.geometry_valid = true;
            log::debug!(
                "geometry upload: {} instances, {} indices",
                scene.batch().len(),
                scene.batch().indices().len()
            );
        }

        device.upload(gpu.transforms, scene.batch().transform_bytes());
        let lights = scene.packed_lights();
        device.upload(gpu.lights, bytemuck::cast_slice(&lights));

        if self.debug_enabled {
            self.debug.clear();
            self.debug
                .aabb(&scene.bounds.bounds, Vec3::new(1.0, 0.3, 0.1));
            for (_, model) in scene.registry.visible_models() {
                self.debug
                    .aabb(&model.world_bounds(), Vec3::new(0.2, 1.0, 0.2));
            }
            device.upload(gpu.wire_vertices, self.debug.vertex_bytes());
            device.upload(gpu.wire_colors, self.debug.color_bytes());
            device.upload(gpu.wire_indices, bytemuck::cast_slice(&self.debug.indices()));
        }

        for pass in &scene.passes {
            device.bind_target(match pass.target {
                PassTarget::Default => None,
                PassTarget::Reflection => Some(gpu.reflection),
            });

            let camera = match pass.camera {
                PassCamera::Main => scene.camera.clone(),
                PassCamera::Reflection => scene.reflection_camera(),
            };
            device.upload(
                gpu.frame_uniforms,
                bytemuck::cast_slice(&frame_uniforms(&camera, self.aspect)),
            );

            if pass.stages.contains(PassStages::SKY) {
                device.bind_buffers(gpu.sky_vertices, gpu.sky_indices);
                device.draw_indexed(6, 0);
            }

            if pass.stages.contains(PassStages::MESHES) && !scene.batch().is_empty() {
                device.bind_buffers(gpu.mesh_vertices, gpu.mesh_indices);
                let counts = scene.batch().counts();
                let offsets = scene.batch().byte_offsets();
                match &pass.mask {
                    Some(mask) => {
                        for slot in mask {
                            device.draw_indexed(counts[slot.0], offsets[slot.0]);
                        }
                    }
                    None => {
                        for i in 0..scene.batch().len() {
                            device.draw_indexed(counts[i], offsets[i]);
                        }
                    }
                }
            }

            if pass.stages.contains(PassStages::DEBUG)
                && self.debug_enabled
                && !self.debug.is_empty()
            {
                device.bind_buffers(gpu.wire_vertices, gpu.wire_indices);
                device.draw_indexed(self.debug.vertex_count() as i32, 0);
            }
        }

        device.bind_target(None);
    }

    fn create_gpu_state(device: &mut dyn GraphicsDevice) -> GpuState {
        let state = GpuState {
            mesh_vertices: device.create_buffer(),
            mesh_indices: device.create_buffer(),
            transforms: device.create_buffer(),
            lights: device.create_buffer(),
            frame_uniforms: device.create_buffer(),
            sky_vertices: device.create_buffer(),
            sky_indices: device.create_buffer(),
            wire_vertices: device.create_buffer(),
            wire_colors: device.create_buffer(),
            wire_indices: device.create_buffer(),
            reflection: device.create_target(),
        };
        // The sky is a fixed full-screen quad in clip space.
        let sky_quad: [[f32; 3]; 4] = [
            [-1.0, -1.0, 0.0],
            [1.0, -1.0, 0.0],
            [1.0, 1.0, 0.0],
            [-1.0, 1.0, 0.0],
        ];
        let sky_indices: [u32; 6] = [0, 1, 2, 0, 2, 3];
        device.upload(state.sky_vertices, bytemuck::cast_slice(&sky_quad));
        device.upload(state.sky_indices, bytemuck::cast_slice(&sky_indices));
        state
    }
}

/// Per-pass uniform payload: view matrix, projection matrix, and eye
/// position, flattened column-major
fn frame_uniforms(camera: &super::Camera, aspect: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(camera.view().as_slice());
    data.extend_from_slice(camera.projection_matrix(aspect).as_slice());
    data.extend_from_slice(&[camera.position.x, camera.position.y, camera.position.z, 0.0]);
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::render::device::{DeviceCall, RecordingDevice};

    fn demo_scene() -> Scene {
        let config = AppConfig::default();
        let mut scene = Scene::new(&config);
        scene.spawn_particle();
        scene.spawn_particle();
        scene
    }

    #[test]
    fn geometry_uploads_only_when_instances_change() {
        let mut scene = demo_scene();
        let mut renderer = Renderer::new();
        let mut device = RecordingDevice::default();

        renderer.render_frame(&mut device, &mut scene);
        let uploads_first = device.calls.len();
        assert!(uploads_first > 0);

        // Second frame with the same instance set: transforms and lights
        // still upload, vertices and indices do not.
        device.clear();
        renderer.render_frame(&mut device, &mut scene);
        let second: Vec<_> = device.calls.clone();
        assert!(second
            .iter()
            .all(|c| !matches!(c, DeviceCall::CreateBuffer(_))));
        let upload_count_stable = second
            .iter()
            .filter(|c| matches!(c, DeviceCall::Upload { .. }))
            .count();

        // Spawning marks the batch dirty again.
        device.clear();
        scene.spawn_particle();
        renderer.render_frame(&mut device, &mut scene);
        let upload_count_dirty = device
            .calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::Upload { .. }))
            .count();
        assert_eq!(upload_count_dirty, upload_count_stable + 2);
    }

    #[test]
    fn passes_draw_masked_subsets() {
        let mut scene = demo_scene();
        let mut renderer = Renderer::new();
        let mut device = RecordingDevice::default();
        renderer.render_frame(&mut device, &mut scene);

        // Two passes (reflection + main), each drawing sky + both particles:
        // 2 * (1 sky + 2 meshes) draws.
        assert_eq!(device.draw_count(), 6);

        // Hiding one particle shrinks both passes by one draw.
        let hidden = scene.registry.models.keys().next().expect("has models");
        scene.set_hidden(hidden, true);
        device.clear();
        renderer.render_frame(&mut device, &mut scene);
        assert_eq!(device.draw_count(), 4);
    }

    #[test]
    fn reflection_pass_binds_offscreen_target_first() {
        let mut scene = demo_scene();
        let mut renderer = Renderer::new();
        let mut device = RecordingDevice::default();
        renderer.render_frame(&mut device, &mut scene);

        let binds: Vec<_> = device
            .calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::BindTarget(t) => Some(*t),
                _ => None,
            })
            .collect();
        assert!(binds.len() >= 3);
        assert!(binds[0].is_some(), "reflection target comes first");
        assert_eq!(binds[1], None, "main pass uses the default framebuffer");
        assert_eq!(*binds.last().expect("has binds"), None);
    }

    #[test]
    fn debug_overlay_adds_wire_draws() {
        let mut scene = demo_scene();
        let mut renderer = Renderer::new();
        let mut device = RecordingDevice::default();
        renderer.render_frame(&mut device, &mut scene);
        let baseline = device.draw_count();

        renderer.debug_enabled = true;
        device.clear();
        renderer.render_frame(&mut device, &mut scene);
        // Only the main pass runs the debug stage.
        assert_eq!(device.draw_count(), baseline + 1);
    }
}
