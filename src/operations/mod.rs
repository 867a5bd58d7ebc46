pub mod inset;
pub mod transform;
