//! Table-driven radix-2 FFT over `Complex32`, the datapath of the
//! behavioral accelerator model.

pub mod complex;
mod core;

pub use complex::CplxFft;
