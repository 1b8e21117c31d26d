pub mod runner;

pub use runner::SimRunner;

// Used by `export_scene!` expansions so scenes need not depend on js-sys.
#[doc(hidden)]
pub use js_sys;

/// Seed for a scene: the configured one, else the host clock.
pub fn seed_from(config_seed: Option<u64>, now_ms: f64) -> u64 {
    config_seed.unwrap_or(now_ms as u64)
}

/// Generate all `#[wasm_bindgen]` exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the SimRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene_init, scene_frame, input handlers, buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod scene;
/// use scene::MyScene;
///
/// orrery_web::export_scene!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$sim_type`: The scene struct type that implements `orrery_engine::Simulation`
/// - `$scene_name`: A string literal used in the initialization log message
///
/// Calls made before `scene_init()` are ignored and return zero values.
#[macro_export]
macro_rules! export_scene {
    ($sim_type:ty, $scene_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SimRunner<$sim_type>>> = RefCell::new(None);
        }

        fn with_runner<R: Default>(f: impl FnOnce(&mut $crate::SimRunner<$sim_type>) -> R) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    log::warn!("{}: not initialized, call scene_init() first", $scene_name);
                    R::default()
                }
            })
        }

        #[wasm_bindgen]
        pub fn scene_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let sim = <$sim_type>::new();
            let seed = $crate::seed_from(
                orrery_engine::Simulation::config(&sim).seed,
                $crate::js_sys::Date::now(),
            );
            let runner = $crate::SimRunner::new(sim, seed);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            log::info!("{}: initialized", $scene_name);
        }

        /// Advance and pack one frame. `now_ms` is the host timestamp.
        #[wasm_bindgen]
        pub fn scene_frame(now_ms: f64) {
            with_runner(|r| r.frame(now_ms));
        }

        #[wasm_bindgen]
        pub fn scene_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn scene_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn scene_resize(width: u32, height: u32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        /// Mesh source text fetched by the host.
        #[wasm_bindgen]
        pub fn scene_load_mesh(source: &str) {
            with_runner(|r| r.load_mesh(Some(source)));
        }

        /// The host could not fetch the mesh source.
        #[wasm_bindgen]
        pub fn scene_mesh_unavailable() {
            with_runner(|r| r.load_mesh(None));
        }

        // ---- Buffer accessors ----

        #[wasm_bindgen]
        pub fn get_buffer_ptr() -> *const f32 {
            RUNNER.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .map_or(std::ptr::null(), |r| r.buffer_ptr())
            })
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        #[wasm_bindgen]
        pub fn get_star_data_offset() -> u32 {
            with_runner(|r| r.star_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_sphere_data_offset() -> u32 {
            with_runner(|r| r.sphere_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_ring_data_offset() -> u32 {
            with_runner(|r| r.ring_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_mesh_data_offset() -> u32 {
            with_runner(|r| r.mesh_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_primitive_count() -> u32 {
            with_runner(|r| r.primitive_count())
        }

        // ---- Config accessors ----

        #[wasm_bindgen]
        pub fn get_window_title() -> String {
            with_runner(|r| r.title())
        }

        #[wasm_bindgen]
        pub fn get_mesh_path() -> String {
            with_runner(|r| r.mesh_path())
        }

        #[wasm_bindgen]
        pub fn get_window_width() -> u32 {
            with_runner(|r| r.width())
        }

        #[wasm_bindgen]
        pub fn get_window_height() -> u32 {
            with_runner(|r| r.height())
        }
    };
}
