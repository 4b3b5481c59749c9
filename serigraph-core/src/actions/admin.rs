//! Terminal administration actions.

use serigraph_protocol::Args;

use super::{Action, Context, Outcome};
use crate::panel::Panel;
use crate::profile;

/// `AT+SD` - switch the panel profile; exactly one argument, the profile name
pub struct SetDevice;

impl<P: Panel> Action<P> for SetDevice {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() != 1 {
            return Outcome::Done;
        }
        let name = args[0];
        match profile::find(name) {
            Some(index) => {
                if cx.port.debug() {
                    cx.port.print(format_args!("profile set to '{}'\n", name));
                }
                Outcome::Reconfigure(index)
            }
            None => {
                if cx.port.debug() {
                    cx.port.print(format_args!("'{}' is not supported\n", name));
                }
                Outcome::Done
            }
        }
    }
}

/// `AT+DB` - toggle diagnostic output; the argument must be `0` or `1`
pub struct SetDebug;

impl<P: Panel> Action<P> for SetDebug {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() != 1 {
            if cx.port.debug() {
                cx.port.print(format_args!("parameter error\n"));
            }
            return Outcome::Done;
        }
        match args[0] {
            "0" => cx.port.set_debug(false),
            "1" => cx.port.set_debug(true),
            _ => {
                if cx.port.debug() {
                    cx.port.print(format_args!("parameter is not '0' or '1'\n"));
                }
            }
        }
        Outcome::Done
    }
}

/// Placeholder for slots with no handler on the current profile.
///
/// Echoes its arguments when debug output is on, so unwired commands are
/// still visible from the host side.
pub struct Unassigned;

impl<P: Panel> Action<P> for Unassigned {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if cx.port.debug() {
            cx.port.print(format_args!("no action bound\n"));
            for (i, arg) in args.iter().enumerate() {
                cx.port.print(format_args!("param {} = {}\n", i + 1, arg));
            }
        }
        Outcome::Done
    }
}
