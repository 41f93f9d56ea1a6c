pub mod attrs;
pub mod color;
pub mod frame;
