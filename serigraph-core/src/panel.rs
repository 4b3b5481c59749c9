//! Panel abstraction.
//!
//! The dispatcher drives a display panel exclusively through this trait.
//! The drawing itself, and the bus underneath, belong to the implementing
//! driver.

/// Font selector for the text actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    Small,
    Large,
}

impl FontId {
    /// Selector value used on the wire (`AT+sF=0;` / `AT+sF=1;`)
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(FontId::Small),
            1 => Some(FontId::Large),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            FontId::Small => 0,
            FontId::Large => 1,
        }
    }

    /// Character cell width in pixels
    pub fn width(self) -> u16 {
        match self {
            FontId::Small => 8,
            FontId::Large => 10,
        }
    }

    /// Character cell height in pixels
    pub fn height(self) -> u16 {
        match self {
            FontId::Small => 13,
            FontId::Large => 20,
        }
    }
}

/// Errors surfaced by a panel driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Bus transaction failed
    Bus,
    /// Coordinates outside the panel
    OutOfBounds,
}

/// A display panel driven by the command terminal.
///
/// All colors are RGB565. Handlers call these from the main loop and need
/// prompt returns; a driver that must defer work has to buffer it.
pub trait Panel {
    /// Run the panel bring-up sequence (reset, init registers)
    fn bring_up(&mut self) -> Result<(), PanelError>;

    /// Switch the panel on or off
    fn power(&mut self, on: bool) -> Result<(), PanelError>;

    /// Set panel contrast, where the hardware supports it
    fn set_contrast(&mut self, level: u16) -> Result<(), PanelError>;

    /// Set backlight brightness, where the hardware supports it
    fn set_brightness(&mut self, level: u16) -> Result<(), PanelError>;

    /// Fill the whole screen with one color
    fn fill_screen(&mut self, color: u16) -> Result<(), PanelError>;

    fn draw_point(&mut self, x: u16, y: u16, color: u16) -> Result<(), PanelError>;

    fn draw_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: u16)
        -> Result<(), PanelError>;

    fn draw_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: u16)
        -> Result<(), PanelError>;

    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: u16)
        -> Result<(), PanelError>;

    fn draw_circle(&mut self, x: u16, y: u16, radius: u16, color: u16) -> Result<(), PanelError>;

    fn fill_circle(&mut self, x: u16, y: u16, radius: u16, color: u16) -> Result<(), PanelError>;

    fn draw_round_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> Result<(), PanelError>;

    fn fill_round_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> Result<(), PanelError>;

    /// Draw text at a pixel position with the given font and paint colors
    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        font: FontId,
        fg: u16,
        bg: u16,
    ) -> Result<(), PanelError>;
}
