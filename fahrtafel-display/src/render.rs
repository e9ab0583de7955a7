//! Render model and pixel layout
//!
//! The composer produces a bounded [`RenderModel`]; this module maps it to
//! backend draw calls. All coordinates are for the 256x64 panel with the
//! built-in 8x8 font.

use heapless::{String, Vec};

use fahrtafel_feed::{MAX_DIRECTION_BYTES, MAX_LINE_LEN, MAX_WEATHER_LEN};

use crate::backend::{DisplayBackend, DisplayError, PANEL_WIDTH};

/// Maximum departure rows on screen
pub const MAX_ROWS: usize = 4;

/// Maximum rows sharing one direction
///
/// Keeps one frequent line from crowding out diversity.
pub const MAX_ROWS_PER_DIRECTION: usize = 2;

/// Capacity of a row's time label ("in 9 min")
pub const MAX_LABEL_LEN: usize = 12;

/// Station name shown in the header.
///
/// The font is ASCII-only; the umlaut dots for the 'o' are drawn as pixels
/// at [`UMLAUT_MARK_X`].
pub const STATION_LABEL: &str = "Bad Schonborn";

/// Pixel x of the 'o' in [`STATION_LABEL`] that carries umlaut marks
pub const UMLAUT_MARK_X: u16 = 56;

const FONT_W: u16 = 8;
const HEADER_Y: u16 = 2;
const RULE_Y: u16 = 12;
const LABEL_X: u16 = 190;
const CLOCK_X: u16 = LABEL_X + 26;
const ROWS_Y: u16 = 16;
const ROW_STEP: u16 = 10;
const DIRECTION_X: u16 = 35;
const BANNER_X: u16 = 64;
const BANNER_Y: u16 = 56;

const BRIGHT: u8 = 15;
const DIM: u8 = 10;
const RULE_INTENSITY: u8 = 6;

/// Wi-Fi glyph, 13x7, drawn pixel by pixel when connected
const WIFI_BITMAP: [&str; 7] = [
    "   XXXXXXX   ",
    "  X       X  ",
    " X  XXXXX  X ",
    "X  X     X  X",
    "  X  XXX  X  ",
    "    X   X    ",
    "      X      ",
];

/// One composed departure row
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderRow {
    /// Line symbol
    pub line: String<MAX_LINE_LEN>,
    /// Shortened destination
    pub direction: String<MAX_DIRECTION_BYTES>,
    /// Time label ("sofort", "in N min" or "HH:MM")
    pub label: String<MAX_LABEL_LEN>,
}

/// Header content
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeaderModel {
    /// Local wall clock as "HH:MM"
    pub clock: String<5>,
    /// Temperature readout; suppressed when offline
    pub weather: Option<String<MAX_WEATHER_LEN>>,
    /// Connectivity glyph state
    pub online: bool,
}

/// Bounded, display-ready view of one schedule snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderModel {
    /// Header line content
    pub header: HeaderModel,
    /// At most [`MAX_ROWS`] departure rows, ascending by countdown
    pub rows: Vec<RenderRow, MAX_ROWS>,
    /// Snapshot came from the offline timetable
    pub offline_banner: bool,
    /// No departures available at all
    pub no_data: bool,
    /// No data because connectivity is down
    pub waiting_for_network: bool,
}

/// Draw a render model to the backend and present it.
pub fn render(
    model: &RenderModel,
    display: &mut impl DisplayBackend,
) -> Result<(), DisplayError> {
    display.clear()?;

    draw_header(&model.header, display)?;
    display.draw_hline(0, RULE_Y, PANEL_WIDTH, RULE_INTENSITY)?;

    if model.no_data {
        display.draw_text(0, 20, "Keine Daten...", BRIGHT)?;
        if model.waiting_for_network {
            display.draw_text(0, 30, "Warte auf WiFi...", DIM)?;
        }
    } else {
        let mut y = ROWS_Y;
        for row in &model.rows {
            display.draw_text(0, y, &row.line, BRIGHT)?;
            display.draw_text(DIRECTION_X, y, &row.direction, DIM)?;
            display.draw_text(LABEL_X, y, &row.label, BRIGHT)?;
            y += ROW_STEP;
        }
        if model.offline_banner {
            display.draw_text(BANNER_X, BANNER_Y, "* OFFLINE PLAN *", DIM)?;
        }
    }

    display.present()
}

fn draw_header(
    header: &HeaderModel,
    display: &mut impl DisplayBackend,
) -> Result<(), DisplayError> {
    display.draw_text(0, HEADER_Y, STATION_LABEL, BRIGHT)?;
    draw_umlaut_marks(display, UMLAUT_MARK_X, HEADER_Y)?;

    display.draw_text(CLOCK_X, HEADER_Y, &header.clock, BRIGHT)?;

    // Weather sits right-aligned against the clock column; the glyph
    // follows to its left so the header never overlaps.
    let mut cursor_x = CLOCK_X;
    if let Some(weather) = header.weather.as_deref() {
        if header.online {
            let width = weather.len() as u16 * FONT_W;
            cursor_x = CLOCK_X - width - FONT_W;
            display.draw_text(cursor_x, HEADER_Y, weather, DIM)?;
        }
    }
    draw_wifi_glyph(display, cursor_x - 21, HEADER_Y, header.online)
}

/// Two dots over an 'o' the ASCII font cannot express
fn draw_umlaut_marks(
    display: &mut impl DisplayBackend,
    x: u16,
    y: u16,
) -> Result<(), DisplayError> {
    display.draw_pixel(x + 2, y - 1, BRIGHT)?;
    display.draw_pixel(x + 5, y - 1, BRIGHT)
}

fn draw_wifi_glyph(
    display: &mut impl DisplayBackend,
    x: u16,
    y: u16,
    connected: bool,
) -> Result<(), DisplayError> {
    if connected {
        for (row, bits) in WIFI_BITMAP.iter().enumerate() {
            for (col, c) in bits.chars().enumerate() {
                if c == 'X' {
                    display.draw_pixel(x + col as u16, y + row as u16, BRIGHT)?;
                }
            }
        }
        Ok(())
    } else {
        display.draw_line(x, y, x + 9, y + 8, BRIGHT)?;
        display.draw_line(x + 9, y, x, y + 8, BRIGHT)
    }
}

/// Full-screen status message ("Syncing Time...", update progress, ...).
pub fn draw_status(
    display: &mut impl DisplayBackend,
    message: &str,
) -> Result<(), DisplayError> {
    display.clear()?;
    display.draw_text(0, HEADER_Y, "System Info", BRIGHT)?;
    display.draw_hline(0, RULE_Y, PANEL_WIDTH, RULE_INTENSITY)?;
    display.draw_text(0, 30, message, BRIGHT)?;
    display.present()
}
