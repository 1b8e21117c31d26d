/// Solar System: six planets with moons around an emissive sun, a
/// twinkling starfield and a ship mesh, seen from a free-flying camera.
///
/// Controls: PageUp/PageDown fly forward/back, arrows strafe and climb,
/// R toggles the orbit rings.

use std::sync::Arc;

use orrery_engine::*;
use orrery_engine::components::starfield;

use crate::bodies;

/// Key bindings as `(DOM key code, key label, action)`, logged once at init.
pub const CONTROLS: [(u32, &str, &str); 7] = [
    (82, "R", "toggle orbit rings"),
    (38, "Up Arrow", "move up"),
    (40, "Down Arrow", "move down"),
    (39, "Right Arrow", "move right"),
    (37, "Left Arrow", "move left"),
    (33, "Page Up", "move forward"),
    (34, "Page Down", "move backward"),
];

pub struct SolarSystem {
    config: SimConfig,
    planets: Vec<Planet>,
    stars: Vec<Star>,
    camera: FlyCamera,
    keys: MoveInput,
    show_orbits: bool,
    /// Ship geometry and its load-time scale. `None` until a non-empty mesh arrives.
    ship: Option<(Arc<RenderMesh>, f32)>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    pub fn with_config(config: SimConfig) -> Self {
        Self {
            config,
            planets: Vec::new(),
            stars: Vec::new(),
            camera: FlyCamera::default(),
            keys: MoveInput::default(),
            show_orbits: true,
            ship: None,
        }
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn keys(&self) -> MoveInput {
        self.keys
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    fn handle_input(&mut self, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::KeyDown { key_code } => match Key::from_code(key_code) {
                    Key::R => self.show_orbits = !self.show_orbits,
                    key => {
                        if let Some(dir) = key.direction() {
                            self.keys.set(dir, true);
                        }
                    }
                },
                InputEvent::KeyUp { key_code } => {
                    if let Some(dir) = Key::from_code(key_code).direction() {
                        self.keys.set(dir, false);
                    }
                }
                InputEvent::Resize { .. } => {}
            }
        }
    }

    fn push_orbit_rings(&self, out: &mut SceneSnapshot) {
        for p in &self.planets {
            out.orbit_rings.push(OrbitRing {
                center: Vector::ZERO,
                radius_x: p.orbit_rx,
                radius_z: p.orbit_rz,
                tilt: 0.0,
                segments: bodies::PLANET_RING_SEGMENTS,
                color: bodies::PLANET_RING_COLOR,
            });
        }
        // Moon rings sit in the tilted frame of their planet.
        for p in &self.planets {
            let center = p.position();
            for m in &p.moons {
                out.orbit_rings.push(OrbitRing {
                    center,
                    radius_x: m.orbit_radius,
                    radius_z: m.orbit_radius,
                    tilt: p.tilt,
                    segments: bodies::MOON_RING_SEGMENTS,
                    color: bodies::MOON_RING_COLOR,
                });
            }
        }
    }

    fn push_bodies(&self, out: &mut SceneSnapshot) {
        out.spheres.push(SphereDraw {
            center: Vector::ZERO,
            radius: bodies::SUN_RADIUS,
            color: bodies::SUN_COLOR,
            emission: bodies::SUN_EMISSION,
            tilt: 0.0,
        });

        for p in &self.planets {
            out.spheres.push(SphereDraw {
                center: p.position(),
                radius: p.radius,
                color: p.color,
                emission: 0.0,
                tilt: p.tilt,
            });
            for m in &p.moons {
                out.spheres.push(SphereDraw {
                    center: p.moon_world_position(m),
                    radius: m.radius,
                    color: m.color,
                    emission: 0.0,
                    tilt: p.tilt,
                });
            }
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for SolarSystem {
    fn config(&self) -> SimConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut SimContext) {
        self.planets = bodies::planets();
        self.stars = starfield::generate(&ctx.config.starfield, &mut ctx.rng);
        self.camera = FlyCamera::new(
            Vector::from(ctx.config.camera_position),
            ctx.config.camera_yaw,
            ctx.config.camera_pitch,
            ctx.config.move_speed,
        );
        self.keys = MoveInput::default();
        self.show_orbits = ctx.config.show_orbits;

        let moons: usize = self.planets.iter().map(|p| p.moons.len()).sum();
        log::info!(
            "solar-system: {} planets, {} moons, {} stars",
            self.planets.len(),
            moons,
            self.stars.len()
        );
        for (_, key, action) in CONTROLS {
            log::info!("  {key:<12} {action}");
        }
    }

    fn update(&mut self, ctx: &mut SimContext, input: &InputQueue) {
        self.handle_input(input);
        advance_all(&mut self.planets, ctx.dt);
        self.camera.integrate(&self.keys, ctx.dt);
    }

    fn render(&self, ctx: &SimContext, out: &mut SceneSnapshot) {
        out.view = self.camera.view();
        out.projection = Projection {
            fov_deg: ctx.config.fov_deg,
            aspect: ctx.aspect(),
            near: ctx.config.near,
            far: ctx.config.far,
        };
        out.light = PointLight {
            position: Vector::ZERO,
            color: bodies::SUN_LIGHT_COLOR,
        };
        out.show_orbits = self.show_orbits;

        let t = ctx.elapsed as f32;
        out.stars.extend(self.stars.iter().map(|s| StarPoint {
            position: s.position,
            size: s.point_size(),
            color: s.twinkle_color(t),
        }));

        if self.show_orbits {
            self.push_orbit_rings(out);
        }
        self.push_bodies(out);

        if let Some((mesh, scale)) = &self.ship {
            out.mesh = Some(MeshDraw {
                mesh: Arc::clone(mesh),
                transform: MeshTransform::animated(*scale, ctx.elapsed),
                color: bodies::HULL_COLOR,
            });
        }
    }

    fn attach_mesh(&mut self, mesh: Mesh) {
        if mesh.is_empty() {
            self.ship = None;
            return;
        }
        let render = RenderMesh::from_mesh(&mesh);
        log::info!(
            "solar-system: ship mesh with {} triangles, scale {:.3}",
            render.triangle_count(),
            mesh.scale
        );
        self.ship = Some((Arc::new(render), mesh.scale));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_PAGE_UP: u32 = 33;
    const KEY_LEFT: u32 = 37;
    const KEY_RIGHT: u32 = 39;
    const KEY_R: u32 = 82;

    fn seeded() -> SimConfig {
        SimConfig {
            seed: Some(0xC0FFEE),
            ..SimConfig::default()
        }
    }

    fn frame_loop() -> FrameLoop<SolarSystem> {
        FrameLoop::new(SolarSystem::with_config(seeded()), 0xC0FFEE)
    }

    const CUBE: &str = "\
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
f 1 2 3
f 1 3 4
f 5 6 7
f 5 7 8
f 1 2 99
";

    #[test]
    fn init_builds_scene() {
        let lp = frame_loop();
        let sim = lp.simulation();
        assert_eq!(sim.planets().len(), bodies::PLANET_COUNT);
        assert_eq!(sim.stars().len(), 200);
        assert_eq!(sim.camera().position, Vector::new(0.0, 8.0, 85.0));
        assert!(sim.show_orbits());
    }

    #[test]
    fn snapshot_contents() {
        let mut lp = frame_loop();
        let snap = lp.tick(0.016);
        // Sun + 6 planets + 4 moons.
        assert_eq!(snap.spheres.len(), 11);
        // 6 planet rings + 4 moon rings.
        assert_eq!(snap.orbit_rings.len(), 10);
        assert_eq!(snap.stars.len(), 200);
        assert!(snap.mesh.is_none());
        assert_eq!(snap.light.color, bodies::SUN_LIGHT_COLOR);
        assert_eq!(snap.spheres[0].radius, bodies::SUN_RADIUS);
        assert!((snap.projection.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn r_toggles_on_key_down_only() {
        let mut lp = frame_loop();
        lp.push_input(InputEvent::KeyDown { key_code: KEY_R });
        lp.push_input(InputEvent::KeyUp { key_code: KEY_R });
        let snap = lp.tick(0.0);
        assert!(!snap.show_orbits);
        assert!(snap.orbit_rings.is_empty());

        lp.push_input(InputEvent::KeyDown { key_code: KEY_R });
        assert_eq!(lp.tick(0.0).orbit_rings.len(), 10);
    }

    #[test]
    fn f3_key_does_not_toggle_orbits() {
        let mut lp = frame_loop();
        lp.push_input(InputEvent::KeyDown { key_code: 114 });
        let snap = lp.tick(0.0);
        assert!(snap.show_orbits);
        assert_eq!(snap.orbit_rings.len(), 10);
    }

    #[test]
    fn controls_cover_every_binding() {
        let keys: Vec<Key> = CONTROLS.iter().map(|&(code, _, _)| Key::from_code(code)).collect();
        assert!(keys.iter().all(|k| !matches!(k, Key::Other(_))));
        assert_eq!(keys.iter().filter(|k| **k == Key::R).count(), 1);

        let dirs: Vec<Direction> = keys.iter().filter_map(|k| k.direction()).collect();
        assert_eq!(dirs.len(), 6);
        for d in [
            Direction::Forward,
            Direction::Backward,
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert!(dirs.contains(&d), "{d:?} has no listed key");
        }
    }

    #[test]
    fn held_key_moves_camera_until_released() {
        let mut lp = frame_loop();
        let start = lp.simulation().camera().position;

        lp.push_input(InputEvent::KeyDown { key_code: KEY_PAGE_UP });
        lp.tick(1.0);
        lp.tick(1.0);
        let moved = lp.simulation().camera().position;
        assert!(((moved - start).length() - 50.0).abs() < 1e-3);
        // Pitched slightly down, facing -Z.
        assert!(moved.z < start.z && moved.y < start.y);

        lp.push_input(InputEvent::KeyUp { key_code: KEY_PAGE_UP });
        lp.tick(1.0);
        assert_eq!(lp.simulation().camera().position, moved);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut lp = frame_loop();
        let start = lp.simulation().camera().position;
        lp.push_input(InputEvent::KeyDown { key_code: KEY_LEFT });
        lp.push_input(InputEvent::KeyDown { key_code: KEY_RIGHT });
        lp.tick(1.0);
        assert_eq!(lp.simulation().camera().position, start);
        assert!(lp.simulation().keys().any());
    }

    #[test]
    fn orbits_advance_before_snapshot() {
        let mut lp = frame_loop();
        let snap = lp.tick(1.0).clone();
        let first = &lp.simulation().planets()[0];
        assert_eq!(first.angle, 48.0);
        assert_eq!(snap.spheres[1].center, first.position());
    }

    #[test]
    fn moon_follows_tilted_frame() {
        let lp = frame_loop();
        let sim = lp.simulation();
        let p = &sim.planets()[3];
        let m = &p.moons[0];
        let world = p.moon_world_position(m);
        // Phase 0: offset along local X, tilted 23 degrees about Z.
        let offset = world - p.position();
        assert!((offset.length() - m.orbit_radius).abs() < 1e-4);
        assert!(offset.y > 0.0);
    }

    #[test]
    fn attached_mesh_is_drawn() {
        let mut lp = frame_loop();
        lp.attach_mesh(Mesh::parse(CUBE, 6.0));
        let snap = lp.tick(0.5);
        let draw = snap.mesh.as_ref().expect("mesh drawn");
        assert_eq!(draw.mesh.triangle_count(), 4);
        assert!((draw.transform.scale - 3.0).abs() < 1e-5);
        assert_eq!(draw.transform.translation, MeshTransform::ANCHOR);
        assert_eq!(draw.color, bodies::HULL_COLOR);
    }

    #[test]
    fn empty_mesh_is_skipped() {
        let mut lp = frame_loop();
        lp.attach_mesh(Mesh::empty());
        assert!(lp.tick(0.1).mesh.is_none());
    }

    #[test]
    fn stars_twinkle_over_time() {
        let mut lp = frame_loop();
        let colors = |snap: &SceneSnapshot| snap.stars.iter().map(|s| s.color).collect::<Vec<_>>();
        let a = colors(lp.tick(0.0));
        let b = colors(lp.tick(0.5));
        assert_ne!(a, b);
        assert_eq!(lp.snapshot().stars[0].position, lp.simulation().stars()[0].position);
    }

    #[test]
    fn packs_into_frame_buffer() {
        use orrery_engine::bridge::protocol::*;

        let mut lp = frame_loop();
        let mut buf = FrameBuffer::new(ProtocolLayout::from_config(&seeded()));
        lp.attach_mesh(Mesh::parse(CUBE, 6.0));
        let timing = lp.present(0.016, &mut buf);

        assert_eq!(buf.header(HEADER_STAR_COUNT), 200.0);
        assert_eq!(buf.header(HEADER_SPHERE_COUNT), 11.0);
        assert_eq!(buf.header(HEADER_RING_COUNT), 10.0);
        assert_eq!(buf.header(HEADER_MESH_VERTEX_COUNT), 12.0);
        assert_eq!(timing.primitives, 200 + 11 + 10 + 4);
    }
}
