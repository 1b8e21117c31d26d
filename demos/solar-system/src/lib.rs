use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod game;
use game::SolarSystem;

orrery_web::export_scene!(SolarSystem, "solar-system");
