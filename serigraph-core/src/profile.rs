//! Panel profile registry.
//!
//! The reconfigure command (`AT+SD`) switches the terminal between supported
//! panel types at runtime. A profile carries the logical geometry the size
//! queries report and the capability flag that gates the optional slot
//! bindings.

/// One supported panel type
#[derive(Debug, Clone, Copy)]
pub struct PanelProfile {
    /// Name matched, case-sensitively, by the reconfigure command
    pub name: &'static str,
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// Whether the contrast/brightness commands are wired up
    pub backlight_control: bool,
}

/// Supported panel types, power-on default first
pub const PROFILES: &[PanelProfile] = &[
    PanelProfile {
        name: "ST7789V",
        width: 240,
        height: 320,
        backlight_control: true,
    },
    PanelProfile {
        name: "HX8347A",
        width: 240,
        height: 320,
        backlight_control: false,
    },
];

/// Index of the profile active at power-on
pub const DEFAULT_PROFILE: usize = 0;

/// Find a profile index by name
pub fn find(name: &str) -> Option<usize> {
    PROFILES.iter().position(|p| p.name == name)
}
