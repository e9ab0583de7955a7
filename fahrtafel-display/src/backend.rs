//! Display backend trait
//!
//! Defines the pixel/text primitives the render layer draws through. The
//! panel initialization sequence and raw register access live in the
//! board-specific driver implementing this trait.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Coordinates outside the panel area
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Panel width in pixels
pub const PANEL_WIDTH: u16 = 256;

/// Panel height in pixels
pub const PANEL_HEIGHT: u16 = 64;

/// Maximum drawing intensity (4-bit grayscale)
pub const INTENSITY_MAX: u8 = 15;

/// Display backend trait
///
/// Provides a hardware-agnostic interface to a buffered grayscale panel.
/// Drawing calls mutate the back buffer; nothing reaches the glass until
/// [`DisplayBackend::present`].
pub trait DisplayBackend {
    /// Clear the back buffer to black
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with the built-in 8x8 font
    ///
    /// - `x`, `y`: top-left pixel position
    /// - `intensity`: 0 (off) to 15 (full)
    fn draw_text(&mut self, x: u16, y: u16, text: &str, intensity: u8)
        -> Result<(), DisplayError>;

    /// Set a single pixel
    fn draw_pixel(&mut self, x: u16, y: u16, intensity: u8) -> Result<(), DisplayError>;

    /// Draw a line between two points
    fn draw_line(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        intensity: u8,
    ) -> Result<(), DisplayError>;

    /// Draw a horizontal line of `length` pixels starting at (`x`, `y`)
    fn draw_hline(&mut self, x: u16, y: u16, length: u16, intensity: u8)
        -> Result<(), DisplayError>;

    /// Push the back buffer to the panel
    fn present(&mut self) -> Result<(), DisplayError>;
}
