//! Math utilities and types
//!
//! Colour triples parsed from material descriptions are plain `f64` vectors.

pub use nalgebra::Vector3;

/// RGB colour triple
pub type Colour3 = Vector3<f64>;

/// Build a colour with the same value in every channel
pub fn grey(value: f64) -> Colour3 {
    Colour3::repeat(value)
}

/// Flatten a colour into the `f32` triple written to attribute trees
pub fn to_rgb_f32(colour: &Colour3) -> Vec<f32> {
    colour.iter().map(|&channel| channel as f32).collect()
}
