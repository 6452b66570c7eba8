//! Interpolation helpers.
//!
//! Curves blend their keyframe states with a De Casteljau reduction: repeated
//! pairwise linear interpolation until a single value remains.

pub mod functions;

pub use functions::{de_casteljau, scaled_add_f32, scaled_add_vec3, scaled_add_vec4};
