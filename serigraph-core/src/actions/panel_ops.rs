//! Actions that drive the panel.
//!
//! Argument counts mirror the command reference; a call with the wrong
//! count is silently dropped (the host gets debug output only where a
//! failure is worth a line). Panel errors are reported and the command is
//! considered handled.

use serigraph_protocol::Args;

use super::paint::{color_from_args, parse_decimal};
use super::{report_panel, Action, Context, Outcome};
use crate::panel::Panel;

fn coord(args: &Args<'_>, index: usize) -> u16 {
    parse_decimal(args[index]) as u16
}

/// `AT+II` - re-run the panel bring-up sequence
pub struct PanelInit;

impl<P: Panel> Action<P> for PanelInit {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if !args.is_empty() {
            return Outcome::Done;
        }
        let res = cx.panel.bring_up();
        if res.is_ok() && cx.port.debug() {
            cx.port.print(format_args!("panel initialized\n"));
        }
        report_panel(cx.port, res);
        Outcome::Done
    }
}

/// `AT+GX` - report the panel width for the active profile
pub struct PanelWidth;

impl<P: Panel> Action<P> for PanelWidth {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.is_empty() {
            cx.port
                .print(format_args!("width is {}\n", cx.device.profile().width));
        }
        Outcome::Done
    }
}

/// `AT+GY` - report the panel height for the active profile
pub struct PanelHeight;

impl<P: Panel> Action<P> for PanelHeight {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.is_empty() {
            cx.port
                .print(format_args!("height is {}\n", cx.device.profile().height));
        }
        Outcome::Done
    }
}

/// `AT+DO` - switch the panel on
pub struct PanelOn;

impl<P: Panel> Action<P> for PanelOn {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.is_empty() {
            let res = cx.panel.power(true);
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+DF` - switch the panel off
pub struct PanelOff;

impl<P: Panel> Action<P> for PanelOff {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.is_empty() {
            let res = cx.panel.power(false);
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+SC` - set panel contrast (profiles with backlight control only)
pub struct SetContrast;

impl<P: Panel> Action<P> for SetContrast {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 1 {
            let res = cx.panel.set_contrast(coord(args, 0));
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+SB` - set backlight brightness (profiles with backlight control only)
pub struct SetBrightness;

impl<P: Panel> Action<P> for SetBrightness {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 1 {
            let res = cx.panel.set_brightness(coord(args, 0));
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+cs` - clear the screen to the back color
pub struct ClearScreen;

impl<P: Panel> Action<P> for ClearScreen {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.is_empty() {
            let res = cx.panel.fill_screen(cx.device.back);
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+fs` - fill the screen with a color; no usable color argument falls
/// back to the back color
pub struct FillScreen;

impl<P: Panel> Action<P> for FillScreen {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        let color = color_from_args(args, cx.device.back);
        let res = cx.panel.fill_screen(color);
        report_panel(cx.port, res);
        Outcome::Done
    }
}

/// `AT+dp` - draw a point at x,y in the front color
pub struct DrawPoint;

impl<P: Panel> Action<P> for DrawPoint {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 2 {
            let res = cx
                .panel
                .draw_point(coord(args, 0), coord(args, 1), cx.device.front);
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+dl` - draw a line x0,y0,x1,y1 in the front color
pub struct DrawLine;

impl<P: Panel> Action<P> for DrawLine {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 4 {
            let res = cx.panel.draw_line(
                coord(args, 0),
                coord(args, 1),
                coord(args, 2),
                coord(args, 3),
                cx.device.front,
            );
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+dr` - outline a rectangle x0,y0,x1,y1 in the front color
pub struct DrawRect;

impl<P: Panel> Action<P> for DrawRect {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 4 {
            let res = cx.panel.draw_rect(
                coord(args, 0),
                coord(args, 1),
                coord(args, 2),
                coord(args, 3),
                cx.device.front,
            );
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+fr` - fill a rectangle x0,y0,x1,y1 with the front color
pub struct FillRect;

impl<P: Panel> Action<P> for FillRect {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 4 {
            let res = cx.panel.fill_rect(
                coord(args, 0),
                coord(args, 1),
                coord(args, 2),
                coord(args, 3),
                cx.device.front,
            );
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+dc` - outline a circle at x,y with radius r in the front color
pub struct DrawCircle;

impl<P: Panel> Action<P> for DrawCircle {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 3 {
            let res = cx.panel.draw_circle(
                coord(args, 0),
                coord(args, 1),
                coord(args, 2),
                cx.device.front,
            );
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+fc` - fill a circle at x,y with radius r with the front color
pub struct FillCircle;

impl<P: Panel> Action<P> for FillCircle {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 3 {
            let res = cx.panel.fill_circle(
                coord(args, 0),
                coord(args, 1),
                coord(args, 2),
                cx.device.front,
            );
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+dR` - outline a rounded rectangle x0,y0,x1,y1 in the front color
pub struct DrawRoundRect;

impl<P: Panel> Action<P> for DrawRoundRect {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 4 {
            let res = cx.panel.draw_round_rect(
                coord(args, 0),
                coord(args, 1),
                coord(args, 2),
                coord(args, 3),
                cx.device.front,
            );
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+fR` - fill a rounded rectangle x0,y0,x1,y1 with the front color
pub struct FillRoundRect;

impl<P: Panel> Action<P> for FillRoundRect {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 4 {
            let res = cx.panel.fill_round_rect(
                coord(args, 0),
                coord(args, 1),
                coord(args, 2),
                coord(args, 3),
                cx.device.front,
            );
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+ps` / `AT+pi` / `AT+pf` - draw text at x,y with the current font.
///
/// Integers and floats already arrive rendered as text, so the three
/// commands share one handler.
pub struct PrintText;

impl<P: Panel> Action<P> for PrintText {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.len() == 3 {
            let res = cx.panel.draw_text(
                coord(args, 0),
                coord(args, 1),
                args[2],
                cx.device.font,
                cx.device.front,
                cx.device.back,
            );
            report_panel(cx.port, res);
        }
        Outcome::Done
    }
}

/// `AT+gX` - report the character cell width of the current font
pub struct FontWidth;

impl<P: Panel> Action<P> for FontWidth {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.is_empty() {
            cx.port
                .print(format_args!("font width is {}\n", cx.device.font.width()));
        }
        Outcome::Done
    }
}

/// `AT+gY` - report the character cell height of the current font
pub struct FontHeight;

impl<P: Panel> Action<P> for FontHeight {
    fn invoke(&self, cx: &mut Context<'_, P>, args: &Args<'_>) -> Outcome {
        if args.is_empty() {
            cx.port.print(format_args!(
                "font height is {}\n",
                cx.device.font.height()
            ));
        }
        Outcome::Done
    }
}
