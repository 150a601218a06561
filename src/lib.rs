//! Axis-aligned rectangle primitive for a physically based ray tracer,
//! with the small amount of scene plumbing needed to render it.

pub mod ray;
pub mod bbox;
pub mod error;
pub mod image;
pub mod plane;
pub mod scene;
pub mod camera;
pub mod shapes;
pub mod numeric;
pub mod sampler;
pub mod interval;
pub mod renderer;
pub mod transform;
pub mod interaction;
pub mod json_structs;
pub mod json_parser;

pub mod prelude;
