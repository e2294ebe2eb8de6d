pub mod error;
pub mod renderer;
