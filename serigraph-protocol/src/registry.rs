//! Command registry.
//!
//! A mnemonic is the fixed-width head of an assembled command: the `AT+`
//! marker plus a two-character code. Lookup is a linear scan in registration
//! order over exactly [`MNEMONIC_LEN`] bytes, first exact match wins, and
//! case matters: `AT+SB` selects the brightness slot, `AT+sb` the back
//! color.

/// Mnemonic width: start marker plus 2-character code
pub const MNEMONIC_LEN: usize = 5;

/// Dispatch slot indices, in registration order.
///
/// The action table is indexed by these; which handler sits behind a slot is
/// decided at table construction (and for a few slots, by the active panel
/// profile).
pub mod slot {
    pub const SET_DEVICE: usize = 0;
    pub const PANEL_INIT: usize = 1;
    pub const PANEL_WIDTH: usize = 2;
    pub const PANEL_HEIGHT: usize = 3;
    pub const PANEL_ON: usize = 4;
    pub const PANEL_OFF: usize = 5;
    pub const SET_CONTRAST: usize = 6;
    pub const SET_BRIGHTNESS: usize = 7;
    pub const SET_PAGE: usize = 8;
    pub const WRITE_PAGE: usize = 9;
    pub const CLEAR_SCREEN: usize = 10;
    pub const FILL_SCREEN: usize = 11;
    pub const SET_FRONT_COLOR: usize = 12;
    pub const GET_FRONT_COLOR: usize = 13;
    pub const SET_BACK_COLOR: usize = 14;
    pub const GET_BACK_COLOR: usize = 15;
    pub const DRAW_POINT: usize = 16;
    pub const DRAW_LINE: usize = 17;
    pub const DRAW_RECT: usize = 18;
    pub const DRAW_CIRCLE: usize = 19;
    pub const DRAW_ROUND_RECT: usize = 20;
    pub const FILL_RECT: usize = 21;
    pub const FILL_CIRCLE: usize = 22;
    pub const FILL_ROUND_RECT: usize = 23;
    pub const PRINT_STRING: usize = 24;
    pub const PRINT_INTEGER: usize = 25;
    pub const PRINT_FLOAT: usize = 26;
    pub const SET_FONT: usize = 27;
    pub const GET_FONT: usize = 28;
    pub const FONT_WIDTH: usize = 29;
    pub const FONT_HEIGHT: usize = 30;
    pub const DRAW_BITMAP: usize = 31;
    pub const DATA: usize = 32;
    pub const END: usize = 33;
    pub const EEPROM_WRITE: usize = 34;
    pub const FLASH_WRITE: usize = 35;
    pub const TOUCH_XY: usize = 36;
    pub const SET_DEBUG: usize = 37;

    /// Number of dispatch slots
    pub const COUNT: usize = 38;
}

/// One registry entry: fixed-width mnemonic and the slot it dispatches to
#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub mnemonic: &'static [u8; MNEMONIC_LEN],
    pub slot: usize,
}

/// Every command the terminal understands.
///
/// Upper-case codes address the device itself, lower-case codes paint.
pub const COMMANDS: &[Command] = &[
    Command { mnemonic: b"AT+SD", slot: slot::SET_DEVICE },
    Command { mnemonic: b"AT+II", slot: slot::PANEL_INIT },
    Command { mnemonic: b"AT+GX", slot: slot::PANEL_WIDTH },
    Command { mnemonic: b"AT+GY", slot: slot::PANEL_HEIGHT },
    Command { mnemonic: b"AT+DO", slot: slot::PANEL_ON },
    Command { mnemonic: b"AT+DF", slot: slot::PANEL_OFF },
    Command { mnemonic: b"AT+SC", slot: slot::SET_CONTRAST },
    Command { mnemonic: b"AT+SB", slot: slot::SET_BRIGHTNESS },
    Command { mnemonic: b"AT+SP", slot: slot::SET_PAGE },
    Command { mnemonic: b"AT+WP", slot: slot::WRITE_PAGE },
    Command { mnemonic: b"AT+cs", slot: slot::CLEAR_SCREEN },
    Command { mnemonic: b"AT+fs", slot: slot::FILL_SCREEN },
    Command { mnemonic: b"AT+sf", slot: slot::SET_FRONT_COLOR },
    Command { mnemonic: b"AT+gf", slot: slot::GET_FRONT_COLOR },
    Command { mnemonic: b"AT+sb", slot: slot::SET_BACK_COLOR },
    Command { mnemonic: b"AT+gb", slot: slot::GET_BACK_COLOR },
    Command { mnemonic: b"AT+dp", slot: slot::DRAW_POINT },
    Command { mnemonic: b"AT+dl", slot: slot::DRAW_LINE },
    Command { mnemonic: b"AT+dr", slot: slot::DRAW_RECT },
    Command { mnemonic: b"AT+dc", slot: slot::DRAW_CIRCLE },
    Command { mnemonic: b"AT+dR", slot: slot::DRAW_ROUND_RECT },
    Command { mnemonic: b"AT+fr", slot: slot::FILL_RECT },
    Command { mnemonic: b"AT+fc", slot: slot::FILL_CIRCLE },
    Command { mnemonic: b"AT+fR", slot: slot::FILL_ROUND_RECT },
    Command { mnemonic: b"AT+ps", slot: slot::PRINT_STRING },
    Command { mnemonic: b"AT+pi", slot: slot::PRINT_INTEGER },
    Command { mnemonic: b"AT+pf", slot: slot::PRINT_FLOAT },
    Command { mnemonic: b"AT+sF", slot: slot::SET_FONT },
    Command { mnemonic: b"AT+gF", slot: slot::GET_FONT },
    Command { mnemonic: b"AT+gX", slot: slot::FONT_WIDTH },
    Command { mnemonic: b"AT+gY", slot: slot::FONT_HEIGHT },
    Command { mnemonic: b"AT+dB", slot: slot::DRAW_BITMAP },
    Command { mnemonic: b"AT+DT", slot: slot::DATA },
    Command { mnemonic: b"AT+ED", slot: slot::END },
    Command { mnemonic: b"AT+EW", slot: slot::EEPROM_WRITE },
    Command { mnemonic: b"AT+FW", slot: slot::FLASH_WRITE },
    Command { mnemonic: b"AT+gt", slot: slot::TOUCH_XY },
    Command { mnemonic: b"AT+DB", slot: slot::SET_DEBUG },
];

/// Resolve an assembled command to its dispatch slot.
///
/// Compares exactly the first [`MNEMONIC_LEN`] bytes; a command shorter than
/// that cannot match anything.
pub fn lookup(command: &[u8]) -> Option<usize> {
    let head = command.get(..MNEMONIC_LEN)?;
    COMMANDS
        .iter()
        .find(|c| c.mnemonic.as_slice() == head)
        .map(|c| c.slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact_match() {
        assert_eq!(lookup(b"AT+cs;"), Some(slot::CLEAR_SCREEN));
        assert_eq!(lookup(b"AT+fs=200,23,123;"), Some(slot::FILL_SCREEN));
        assert_eq!(lookup(b"AT+DB=1;"), Some(slot::SET_DEBUG));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup(b"AT+SB=5;"), Some(slot::SET_BRIGHTNESS));
        assert_eq!(lookup(b"AT+sb=5;"), Some(slot::SET_BACK_COLOR));
        assert_eq!(lookup(b"AT+dR=1,2,3,4;"), Some(slot::DRAW_ROUND_RECT));
        assert_eq!(lookup(b"AT+dr=1,2,3,4;"), Some(slot::DRAW_RECT));
        assert_eq!(lookup(b"AT+gX;"), Some(slot::FONT_WIDTH));
        assert_eq!(lookup(b"AT+GX;"), Some(slot::PANEL_WIDTH));
    }

    #[test]
    fn test_lookup_miss() {
        assert_eq!(lookup(b"AT+zz;"), None);
        assert_eq!(lookup(b"AT+CS;"), None);
    }

    #[test]
    fn test_lookup_short_command() {
        assert_eq!(lookup(b"AT+;"), None);
        assert_eq!(lookup(b""), None);
    }

    #[test]
    fn test_slots_are_unique_and_dense() {
        let mut seen = [false; slot::COUNT];
        for cmd in COMMANDS {
            assert!(!seen[cmd.slot], "slot bound twice");
            seen[cmd.slot] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
