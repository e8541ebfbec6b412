//! Audio utilities.
//! Beep synthesis, mixing and the output stream.

pub mod context;
pub mod devices;
pub mod mixer;
pub mod tone;
