//! Display abstraction and render model for the Fahrtafel departure board
//!
//! The physical panel (256x64 4-bit grayscale OLED) is driven out of tree;
//! this crate defines the backend trait the core renders through, the
//! bounded render model the composer produces, and the pixel layout.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod compose;
pub mod render;

pub use backend::{DisplayBackend, DisplayError};
pub use compose::compose;
pub use render::{
    draw_status, render, HeaderModel, RenderModel, RenderRow, MAX_ROWS, MAX_ROWS_PER_DIRECTION,
};
