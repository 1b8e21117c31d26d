use orrery_engine::{
    DrawTiming, FrameBuffer, FrameClock, FrameLoop, InputEvent, Mesh,
    ProtocolLayout, SimConfig, Simulation,
};

/// Generic scene runner that wires the frame loop to the host.
///
/// Each concrete scene (e.g., `solar-system`) creates a `thread_local!`
/// SimRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct SimRunner<S: Simulation> {
    frame_loop: FrameLoop<S>,
    clock: FrameClock,
    buffer: FrameBuffer,
    config: SimConfig,
    last_timing: DrawTiming,
}

impl<S: Simulation> SimRunner<S> {
    /// Build and initialize the scene. `seed` drives the starfield.
    pub fn new(sim: S, seed: u64) -> Self {
        let config = sim.config();
        let clock = FrameClock::new(config.max_dt);
        let buffer = FrameBuffer::new(ProtocolLayout::from_config(&config));
        let frame_loop = FrameLoop::new(sim, seed);

        let mut runner = Self {
            frame_loop,
            clock,
            buffer,
            config,
            last_timing: DrawTiming::default(),
        };
        // Surface size is known before the first frame.
        runner.push_input(InputEvent::Resize {
            width: runner.config.width,
            height: runner.config.height,
        });
        runner
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.frame_loop.push_input(event);
    }

    /// Hand over mesh source text fetched by the host.
    /// `None` means the source could not be fetched; the scene runs without a mesh.
    pub fn load_mesh(&mut self, source: Option<&str>) {
        let mesh = match source {
            Some(text) => Mesh::parse(text, self.config.mesh_target_size),
            None => {
                log::warn!("mesh source {} unavailable; continuing without a mesh", self.config.mesh_path);
                Mesh::empty()
            }
        };
        self.frame_loop.attach_mesh(mesh);
    }

    /// Run one frame from a host timestamp in milliseconds.
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.advance(now_ms);
        self.step(dt);
    }

    /// Run one frame of `dt` seconds, bypassing the clock.
    pub fn step(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, self.clock.max_dt());
        self.last_timing = self.frame_loop.present(dt, &mut self.buffer);
    }

    pub fn frame_loop(&self) -> &FrameLoop<S> {
        &self.frame_loop
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.ptr()
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.buffer.layout().buffer_total_floats as u32
    }

    pub fn star_data_offset(&self) -> u32 {
        self.buffer.layout().star_data_offset as u32
    }

    pub fn sphere_data_offset(&self) -> u32 {
        self.buffer.layout().sphere_data_offset as u32
    }

    pub fn ring_data_offset(&self) -> u32 {
        self.buffer.layout().ring_data_offset as u32
    }

    pub fn mesh_data_offset(&self) -> u32 {
        self.buffer.layout().mesh_data_offset as u32
    }

    pub fn primitive_count(&self) -> u32 {
        self.last_timing.primitives
    }

    // ---- Config accessors ----

    pub fn title(&self) -> String {
        self.config.title.clone()
    }

    pub fn mesh_path(&self) -> String {
        self.config.mesh_path.clone()
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }
}
