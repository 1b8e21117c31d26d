use crate::api::config::SimConfig;
use crate::components::mesh::Mesh;
use crate::core::rng::Rng;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::snapshot::SceneSnapshot;
use crate::renderer::traits::{DrawTiming, Renderer};

/// The contract every animated scene fulfils.
pub trait Simulation {
    /// Return configuration. Called once before init.
    fn config(&self) -> SimConfig {
        SimConfig::default()
    }

    /// Build the initial state: bodies, starfield, camera.
    fn init(&mut self, ctx: &mut SimContext);

    /// Advance one frame. `ctx.dt` holds the step in seconds.
    fn update(&mut self, ctx: &mut SimContext, input: &InputQueue);

    /// Fill a cleared snapshot from the current state. Must not mutate.
    fn render(&self, ctx: &SimContext, out: &mut SceneSnapshot);

    /// Receive a mesh loaded by the host. Scenes without a mesh ignore it.
    fn attach_mesh(&mut self, _mesh: Mesh) {}
}

/// State owned by the frame loop and lent to the simulation each frame.
pub struct SimContext {
    pub config: SimConfig,
    pub rng: Rng,
    /// Step of the current frame, in seconds.
    pub dt: f32,
    /// Seconds since the first frame.
    pub elapsed: f64,
    /// Number of completed ticks.
    pub frame: u64,
    /// Current surface size in pixels.
    pub width: u32,
    pub height: u32,
}

impl SimContext {
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let (width, height) = (config.width, config.height);
        Self {
            config,
            rng: Rng::new(seed),
            dt: 0.0,
            elapsed: 0.0,
            frame: 0,
            width,
            height,
        }
    }

    /// Width over height of the current surface (1.0 when degenerate).
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Drives a [`Simulation`] with an explicit update-then-render boundary.
///
/// Each `tick` performs, in order: time advance, simulation update, input
/// drain, snapshot rebuild. The returned snapshot is never observed
/// half-updated.
pub struct FrameLoop<S: Simulation> {
    sim: S,
    ctx: SimContext,
    input: InputQueue,
    snapshot: SceneSnapshot,
}

impl<S: Simulation> FrameLoop<S> {
    /// Configure and initialize `sim`. `seed` drives every random choice.
    pub fn new(mut sim: S, seed: u64) -> Self {
        let config = sim.config();
        let mut ctx = SimContext::new(config, seed);
        sim.init(&mut ctx);
        log::info!(
            "frame loop ready: {}x{} \"{}\" (seed {seed})",
            ctx.width,
            ctx.height,
            ctx.config.title
        );

        let mut snapshot = SceneSnapshot::default();
        sim.render(&ctx, &mut snapshot);

        Self {
            sim,
            ctx,
            input: InputQueue::new(),
            snapshot,
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn attach_mesh(&mut self, mesh: Mesh) {
        self.sim.attach_mesh(mesh);
    }

    /// Run one frame of `dt` seconds and return the fresh snapshot.
    pub fn tick(&mut self, dt: f32) -> &SceneSnapshot {
        let dt = dt.max(0.0);
        self.ctx.dt = dt;
        self.ctx.elapsed += dt as f64;

        for event in self.input.iter() {
            if let InputEvent::Resize { width, height } = *event {
                self.ctx.width = width;
                self.ctx.height = height;
            }
        }

        self.sim.update(&mut self.ctx, &self.input);
        self.input.drain();
        self.ctx.frame += 1;

        self.snapshot.clear();
        self.snapshot.elapsed = self.ctx.elapsed;
        self.snapshot.frame = self.ctx.frame;
        self.sim.render(&self.ctx, &mut self.snapshot);
        &self.snapshot
    }

    /// Tick, then hand the snapshot to `renderer`. Resize events queued
    /// since the last frame reach the renderer first.
    pub fn present(&mut self, dt: f32, renderer: &mut impl Renderer) -> DrawTiming {
        for event in self.input.iter() {
            if let InputEvent::Resize { width, height } = *event {
                renderer.resize(width, height);
            }
        }
        self.tick(dt);
        renderer.draw(&self.snapshot)
    }

    pub fn snapshot(&self) -> &SceneSnapshot {
        &self.snapshot
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.sim
    }
}
