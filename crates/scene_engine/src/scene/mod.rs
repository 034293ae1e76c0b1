//! Scene composition and simulation
//!
//! The [`Scene`] owns the entity registry, the shared mesh cache, the
//! cameras and render passes, and the world batch. Each frame the
//! application folds input events in, advances the simulation, and hands
//! the scene to the renderer.

mod model;
mod registry;

pub use model::{BatchSlot, Model, WorldBatch, SLOTS_PER_VERTEX};
pub use registry::{Entity, Registry};

use std::sync::Arc;

use slotmap::SecondaryMap;

use crate::assets::{AssetError, MeshLibrary};
use crate::core::config::AppConfig;
use crate::foundation::math::{constants::HALF_PI, utils, Vec3};
use crate::foundation::rng::Rng;
use crate::geometry::Aabb;
use crate::input::{InputState, KeyCode};
use crate::physics::{Body, InteriorBox, Particle};
use crate::render::lighting::{pack_lights, PackedLight};
use crate::render::{Camera, Light, LightKind, Mesh, PassCamera, PassStages, PassTarget, RenderPass};

/// Camera movement speed in world units per second
const CAMERA_SPEED: f32 = 6.0;

/// Mouse-look sensitivity in radians per pixel
const LOOK_SENSITIVITY: f32 = 0.005;

/// The world: entities, cameras, passes, and the batched geometry
pub struct Scene {
    /// Entity and component store
    pub registry: Registry,
    /// Shared mesh cache
    pub meshes: MeshLibrary,
    /// Deterministic random source for spawning
    pub rng: Rng,
    /// Main camera
    pub camera: Camera,
    /// Current input snapshot
    pub input: InputState,
    /// Containing volume all bodies bounce inside
    pub bounds: InteriorBox,
    /// Render passes executed in order each frame
    pub passes: Vec<RenderPass>,
    /// World gravity applied to bodies
    pub gravity: Vec3,
    batch: WorldBatch,
    slots: SecondaryMap<Entity, BatchSlot>,
    batch_dirty: bool,
    reflective: Vec<Entity>,
    reflection_plane_y: f32,
    particle_mesh: Option<Arc<Mesh>>,
    time: f32,
}

impl Scene {
    /// Build an empty scene from the application config
    pub fn new(config: &AppConfig) -> Self {
        let mut camera = Camera::perspective(
            Vec3::new(0.0, 5.0, 14.0),
            utils::deg_to_rad(45.0),
            0.1,
            200.0,
        );
        camera.look_at(Vec3::new(0.0, 2.0, 0.0));

        let passes = vec![
            RenderPass::new(
                PassCamera::Reflection,
                PassTarget::Reflection,
                PassStages::SKY | PassStages::MESHES,
            ),
            RenderPass::new(
                PassCamera::Main,
                PassTarget::Default,
                PassStages::SKY | PassStages::MESHES | PassStages::DEBUG,
            ),
        ];

        Self {
            registry: Registry::new(),
            meshes: MeshLibrary::new(&config.asset_root),
            rng: Rng::new(config.seed),
            camera,
            input: InputState::new(),
            bounds: InteriorBox::new(
                Aabb::new(Vec3::new(-6.0, 0.0, -6.0), Vec3::new(6.0, 12.0, 6.0)),
                0.9,
            ),
            passes,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            batch: WorldBatch::new(),
            slots: SecondaryMap::new(),
            batch_dirty: false,
            reflective: Vec::new(),
            reflection_plane_y: 0.0,
            particle_mesh: None,
            time: 0.0,
        }
    }

    /// Seconds of simulated time so far
    pub fn time(&self) -> f32 {
        self.time
    }

    /// The flattened world geometry
    pub fn batch(&self) -> &WorldBatch {
        &self.batch
    }

    /// Spawn a model loaded from the mesh library.
    ///
    /// Load failures propagate; the caller decides whether to substitute a
    /// placeholder or give up on the scene.
    pub fn spawn_model(&mut self, name: &str) -> Result<Entity, AssetError> {
        let mesh = self.meshes.load(name)?;
        Ok(self.spawn_with_mesh(mesh))
    }

    /// Spawn a model instance around an already loaded mesh
    pub fn spawn_with_mesh(&mut self, mesh: Arc<Mesh>) -> Entity {
        let entity = self.registry.spawn();
        self.registry.models.insert(entity, Model::new(mesh));
        self.batch_dirty = true;
        entity
    }

    /// Spawn a model whose surface mirrors the rest of the scene.
    ///
    /// The entity is excluded from the reflection pass so the mirror never
    /// reflects itself; the reflection plane follows its height.
    pub fn spawn_reflective_model(&mut self, name: &str) -> Result<Entity, AssetError> {
        let entity = self.spawn_model(name)?;
        self.reflective.push(entity);
        if let Some(model) = self.registry.models.get(entity) {
            self.reflection_plane_y = model.position.y;
        }
        self.batch_dirty = true;
        Ok(entity)
    }

    /// Mark an already spawned entity as the reflective surface
    pub fn set_reflective(&mut self, entity: Entity) {
        self.reflective.push(entity);
        if let Some(model) = self.registry.models.get(entity) {
            self.reflection_plane_y = model.position.y;
        }
        self.batch_dirty = true;
    }

    /// Spawn a short-lived particle with random placement and velocity
    pub fn spawn_particle(&mut self) -> Entity {
        let mesh = Arc::clone(
            self.particle_mesh
                .get_or_insert_with(|| Arc::new(Mesh::particle(0.25))),
        );

        let mut spawn_area = self.bounds.bounds;
        spawn_area.set_size(spawn_area.width() * 0.5);
        let position = self.rng.vec_in(&spawn_area);
        let velocity = self.rng.vec(Vec3::new(-3.0, 0.0, -3.0), Vec3::new(3.0, 5.0, 3.0));
        let rotation = self.rng.rotation();
        let lifetime = self.rng.range(2.0, 6.0);

        let entity = self.registry.spawn();
        let mut model = Model::new(mesh);
        model.position = position;
        model.rotation = rotation;
        self.registry.models.insert(entity, model);
        self.registry.bodies.insert(entity, Body::with_velocity(velocity));
        self.registry.particles.insert(entity, Particle::new(lifetime));
        self.batch_dirty = true;
        entity
    }

    /// Spawn a light emitter
    pub fn spawn_light(
        &mut self,
        vector: Vec3,
        color: Vec3,
        intensity: f32,
        kind: LightKind,
    ) -> Entity {
        let entity = self.registry.spawn();
        let light = match kind {
            LightKind::Directional => Light::directional(vector, color, intensity),
            LightKind::Point => Light::point(vector, color, intensity),
        };
        self.registry.lights.insert(entity, light);
        entity
    }

    /// Remove an entity from the world
    pub fn despawn(&mut self, entity: Entity) {
        let had_model = self.registry.models.get(entity).is_some();
        self.registry.despawn(entity);
        self.reflective.retain(|&e| e != entity);
        if had_model {
            self.batch_dirty = true;
        }
    }

    /// Hide or reveal an entity's model
    pub fn set_hidden(&mut self, entity: Entity, hidden: bool) {
        if self.registry.is_hidden(entity) != hidden {
            self.registry.set_hidden(entity, hidden);
            if self.registry.models.get(entity).is_some() {
                self.batch_dirty = true;
            }
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn simulate(&mut self, dt: f32) {
        self.time += dt;
        self.apply_camera_input(dt);

        // Integrate bodies and keep them inside the box.
        let moving: Vec<Entity> = self.registry.bodies.keys().collect();
        for entity in moving {
            let Some(body) = self.registry.bodies.get_mut(entity) else {
                continue;
            };
            body.velocity += self.gravity * (body.gravity_scale * dt);
            let velocity = body.velocity;
            let angular = body.angular_velocity;

            let Some(model) = self.registry.models.get_mut(entity) else {
                continue;
            };
            model.position += velocity * dt;
            model.rotation += angular * dt;

            let mut position = model.position;
            let mut bounced_velocity = velocity;
            if self
                .bounds
                .confine(&model.world_bounds(), &mut position, &mut bounced_velocity)
            {
                model.position = position;
                if let Some(body) = self.registry.bodies.get_mut(entity) {
                    body.velocity = bounced_velocity;
                }
            }
        }

        // Age particles and drop the expired ones.
        let mut expired = Vec::new();
        for (entity, particle) in self.registry.particles.iter_mut() {
            particle.age += dt;
            if particle.expired() {
                expired.push(entity);
            }
        }
        for entity in expired {
            log::debug!("particle expired: {entity:?}");
            self.despawn(entity);
        }

        self.input.end_frame();
    }

    /// Rebuild or refresh the world batch.
    ///
    /// When the visible instance set changed since the last call, geometry
    /// is re-flattened and pass masks recomputed (returns true). Otherwise
    /// only the per-instance transforms are refreshed.
    pub fn update_batch(&mut self) -> bool {
        if self.batch_dirty {
            self.batch.clear();
            self.slots.clear();
            for (entity, model) in self.registry.visible_models() {
                let slot = self.batch.push(model);
                self.slots.insert(entity, slot);
            }
            self.batch_dirty = false;
            self.refresh_pass_masks();
            true
        } else {
            for (entity, slot) in &self.slots {
                if let Some(model) = self.registry.models.get(entity) {
                    self.batch.set_transform(*slot, model);
                }
            }
            false
        }
    }

    /// The main camera mirrored for the reflection pass
    pub fn reflection_camera(&self) -> Camera {
        self.camera.mirrored(self.reflection_plane_y)
    }

    /// All lights packed for upload
    pub fn packed_lights(&self) -> Vec<PackedLight> {
        pack_lights(self.registry.light_entities().map(|(_, light)| light))
    }

    /// Recompute reflection pass masks: everything visible except the
    /// reflective surfaces themselves.
    fn refresh_pass_masks(&mut self) {
        let mut mask = Vec::new();
        for (entity, _) in self.registry.visible_models() {
            if !self.reflective.contains(&entity) {
                if let Some(slot) = self.slots.get(entity) {
                    mask.push(*slot);
                }
            }
        }
        for pass in &mut self.passes {
            if pass.camera == PassCamera::Reflection {
                pass.mask = Some(mask.clone());
            }
        }
    }

    /// Fly-camera movement and mouse look from the input snapshot
    fn apply_camera_input(&mut self, dt: f32) {
        let forward = self.camera.forward();
        let up = Vec3::new(0.0, 1.0, 0.0);
        let right = forward.cross(&up);
        let step = CAMERA_SPEED * dt;

        if self.input.is_pressed(KeyCode::W) || self.input.is_pressed(KeyCode::Up) {
            self.camera.position += forward * step;
        }
        if self.input.is_pressed(KeyCode::S) || self.input.is_pressed(KeyCode::Down) {
            self.camera.position -= forward * step;
        }
        if self.input.is_pressed(KeyCode::A) || self.input.is_pressed(KeyCode::Left) {
            self.camera.position -= right * step;
        }
        if self.input.is_pressed(KeyCode::D) || self.input.is_pressed(KeyCode::Right) {
            self.camera.position += right * step;
        }
        if self.input.is_pressed(KeyCode::E) || self.input.is_pressed(KeyCode::Space) {
            self.camera.position += up * step;
        }
        if self.input.is_pressed(KeyCode::Q) || self.input.is_pressed(KeyCode::Shift) {
            self.camera.position -= up * step;
        }

        if self.input.mouse_right {
            let delta = self.input.mouse_delta;
            self.camera.rotation.x += delta.x * LOOK_SENSITIVITY;
            self.camera.rotation.y = (self.camera.rotation.y - delta.y * LOOK_SENSITIVITY)
                .clamp(-HALF_PI + 0.01, HALF_PI - 0.01);
        }
    }
}
