pub mod align;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod periodogram;
pub mod resample;
pub mod smooth;
