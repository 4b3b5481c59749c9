//! Command actions and slot bindings.
//!
//! Each command dispatches through a slot in the [`ActionTable`]; behind a
//! slot sits a variant implementing [`Action`]. Bindings are fixed at table
//! construction except for the capability-gated slots, which follow the
//! active panel profile.

mod admin;
mod paint;
mod panel_ops;

pub use admin::{SetDebug, SetDevice, Unassigned};
pub use paint::{
    GetBackColor, GetFont, GetFrontColor, SetBackColor, SetFont, SetFrontColor,
};
pub use panel_ops::{
    ClearScreen, DrawCircle, DrawLine, DrawPoint, DrawRect, DrawRoundRect, FillCircle, FillRect,
    FillRoundRect, FillScreen, FontHeight, FontWidth, PanelHeight, PanelInit, PanelOff, PanelOn,
    PanelWidth, PrintText, SetBrightness, SetContrast,
};

use serigraph_protocol::registry::slot;
use serigraph_protocol::Args;

use crate::panel::{FontId, Panel, PanelError};
use crate::profile::{PanelProfile, DEFAULT_PROFILE, PROFILES};
use crate::serial::SerialPort;

/// What the dispatcher should do after an action returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Nothing further
    Done,
    /// Switch to the given profile: rebind gated slots, re-run bring-up
    Reconfigure(usize),
}

/// Mutable state the actions work against
#[derive(Debug, Clone, Copy)]
pub struct DeviceState {
    /// Index into [`PROFILES`]
    pub profile: usize,
    /// Paint color for drawn area
    pub front: u16,
    /// Paint color for blank area
    pub back: u16,
    /// Font used by the text actions
    pub font: FontId,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    pub const fn new() -> Self {
        Self {
            profile: DEFAULT_PROFILE,
            front: 0,
            back: 0xFFFF,
            font: FontId::Small,
        }
    }

    /// The active panel profile
    pub fn profile(&self) -> &'static PanelProfile {
        &PROFILES[self.profile]
    }
}

/// Everything an action may touch
pub struct Context<'c, P: Panel> {
    pub port: &'c SerialPort,
    pub panel: &'c mut P,
    pub device: &'c mut DeviceState,
}

/// A bound command handler.
///
/// Implementations must return promptly and perform side effects only
/// through the context.
pub trait Action<P: Panel> {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome;
}

/// Report a failed panel call when debug output is on
pub(crate) fn report_panel(port: &SerialPort, result: Result<(), PanelError>) {
    if result.is_err() && port.debug() {
        port.print(format_args!("panel error\n"));
    }
}

/// Slot-indexed handler bindings for one terminal
pub struct ActionTable<'a, P: Panel> {
    slots: [&'a dyn Action<P>; slot::COUNT],
}

impl<'a, P: Panel> ActionTable<'a, P> {
    /// Handler behind a slot
    pub fn get(&self, index: usize) -> &'a dyn Action<P> {
        self.slots[index]
    }

    /// Rebind one slot
    pub fn bind(&mut self, index: usize, action: &'a dyn Action<P>) {
        self.slots[index] = action;
    }
}

impl<P: Panel> ActionTable<'static, P> {
    /// Power-on bindings, with the gated slots following the default profile
    pub fn defaults() -> Self {
        let mut slots: [&'static dyn Action<P>; slot::COUNT] = [&Unassigned; slot::COUNT];

        slots[slot::SET_DEVICE] = &SetDevice;
        slots[slot::PANEL_INIT] = &PanelInit;
        slots[slot::PANEL_WIDTH] = &PanelWidth;
        slots[slot::PANEL_HEIGHT] = &PanelHeight;
        slots[slot::PANEL_ON] = &PanelOn;
        slots[slot::PANEL_OFF] = &PanelOff;
        slots[slot::CLEAR_SCREEN] = &ClearScreen;
        slots[slot::FILL_SCREEN] = &FillScreen;
        slots[slot::SET_FRONT_COLOR] = &SetFrontColor;
        slots[slot::GET_FRONT_COLOR] = &GetFrontColor;
        slots[slot::SET_BACK_COLOR] = &SetBackColor;
        slots[slot::GET_BACK_COLOR] = &GetBackColor;
        slots[slot::DRAW_POINT] = &DrawPoint;
        slots[slot::DRAW_LINE] = &DrawLine;
        slots[slot::DRAW_RECT] = &DrawRect;
        slots[slot::DRAW_CIRCLE] = &DrawCircle;
        slots[slot::DRAW_ROUND_RECT] = &DrawRoundRect;
        slots[slot::FILL_RECT] = &FillRect;
        slots[slot::FILL_CIRCLE] = &FillCircle;
        slots[slot::FILL_ROUND_RECT] = &FillRoundRect;
        slots[slot::PRINT_STRING] = &PrintText;
        slots[slot::PRINT_INTEGER] = &PrintText;
        slots[slot::PRINT_FLOAT] = &PrintText;
        slots[slot::SET_FONT] = &SetFont;
        slots[slot::GET_FONT] = &GetFont;
        slots[slot::FONT_WIDTH] = &FontWidth;
        slots[slot::FONT_HEIGHT] = &FontHeight;
        slots[slot::SET_DEBUG] = &SetDebug;
        // DRAW_BITMAP, DATA, END, EEPROM_WRITE, FLASH_WRITE, TOUCH_XY and
        // the page slots stay on Unassigned

        let mut table = Self { slots };
        table.apply_profile(&PROFILES[DEFAULT_PROFILE]);
        table
    }

    /// Rebind the capability-gated subset for a profile
    pub fn apply_profile(&mut self, profile: &PanelProfile) {
        if profile.backlight_control {
            self.slots[slot::SET_CONTRAST] = &SetContrast;
            self.slots[slot::SET_BRIGHTNESS] = &SetBrightness;
        } else {
            self.slots[slot::SET_CONTRAST] = &Unassigned;
            self.slots[slot::SET_BRIGHTNESS] = &Unassigned;
        }
    }
}
