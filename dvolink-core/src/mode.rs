//! Display mode descriptors
//!
//! A [`DisplayMode`] carries the timings the host framework asks an
//! output to drive. Drivers that have no clock dependencies may ignore it
//! entirely.

/// Display timings
///
/// All-zero timings are a valid (degenerate) descriptor; drivers must not
/// assume any field is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMode {
    /// Pixel clock in kHz
    pub clock_khz: u32,
    /// Visible pixels per line
    pub hdisplay: u16,
    /// Horizontal sync start
    pub hsync_start: u16,
    /// Horizontal sync end
    pub hsync_end: u16,
    /// Total pixels per line
    pub htotal: u16,
    /// Visible lines
    pub vdisplay: u16,
    /// Vertical sync start
    pub vsync_start: u16,
    /// Vertical sync end
    pub vsync_end: u16,
    /// Total lines per frame
    pub vtotal: u16,
    /// Horizontal sync is active high
    pub hsync_positive: bool,
    /// Vertical sync is active high
    pub vsync_positive: bool,
    /// Interlaced scanout
    pub interlaced: bool,
}

impl DisplayMode {
    /// VESA 1024x768 @ 60 Hz
    pub const XGA_60: Self = Self {
        clock_khz: 65_000,
        hdisplay: 1024,
        hsync_start: 1048,
        hsync_end: 1184,
        htotal: 1344,
        vdisplay: 768,
        vsync_start: 771,
        vsync_end: 777,
        vtotal: 806,
        hsync_positive: false,
        vsync_positive: false,
        interlaced: false,
    };

    /// Vertical refresh rate in Hz, rounded to nearest
    ///
    /// Returns 0 for descriptors without totals.
    pub fn vrefresh_hz(&self) -> u32 {
        let pixels = self.htotal as u64 * self.vtotal as u64;
        if pixels == 0 {
            return 0;
        }
        ((self.clock_khz as u64 * 1000 + pixels / 2) / pixels) as u32
    }
}
