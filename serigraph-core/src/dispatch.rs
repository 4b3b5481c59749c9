//! Command dispatcher.
//!
//! Owns the assembler, the slot bindings and the device state. The main
//! loop alternates [`Dispatcher::pump`] (drain received bytes into the
//! assembler) and [`Dispatcher::execute`] (resolve and run one complete
//! command). Every failure is terminal for the in-flight command only:
//! report when debug is on, reset, keep going.

use serigraph_protocol::assembler::{AssembleError, Assembler, Phase};
use serigraph_protocol::{registry, tokenize};

use crate::actions::{ActionTable, Context, DeviceState, Outcome};
use crate::panel::Panel;
use crate::profile::PROFILES;
use crate::serial::SerialPort;

/// One terminal: assembler, bindings and device state for a single line
pub struct Dispatcher<P: Panel + 'static> {
    assembler: Assembler,
    table: ActionTable<'static, P>,
    device: DeviceState,
}

impl<P: Panel + 'static> Default for Dispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Panel + 'static> Dispatcher<P> {
    /// Terminal with power-on bindings and paint state
    pub fn new() -> Self {
        Self {
            assembler: Assembler::new(),
            table: ActionTable::defaults(),
            device: DeviceState::new(),
        }
    }

    /// Current assembler phase
    pub fn phase(&self) -> Phase {
        self.assembler.phase()
    }

    /// Device state (profile and paint), mainly for startup and inspection
    pub fn device(&self) -> &DeviceState {
        &self.device
    }

    /// Drain received bytes into the assembler, stopping at a complete
    /// command. While a command waits for dispatch, further bytes stay
    /// queued in the receive ring.
    pub fn pump(&mut self, port: &SerialPort) {
        while !self.assembler.is_ready() {
            let Some(byte) = port.read_byte() else { return };
            match self.assembler.feed(byte) {
                Ok(Phase::Ready) => {
                    if port.debug() {
                        if let Some(command) = self.assembler.command() {
                            if let Ok(text) = core::str::from_utf8(command) {
                                port.print(format_args!("received: {}\n", text));
                            }
                        }
                    }
                }
                Ok(_) => {}
                Err(AssembleError::Prefix) => {
                    if port.debug() {
                        port.print(format_args!("framing error\n"));
                    }
                }
                Err(AssembleError::Overflow) => {
                    if port.debug() {
                        port.print(format_args!("command too long\n"));
                    }
                }
            }
        }
    }

    /// Resolve and run the buffered command, then reset for the next one.
    ///
    /// Does nothing unless the assembler is Ready. Never blocks; the bound
    /// handlers are required to return promptly.
    pub fn execute(&mut self, port: &SerialPort, panel: &mut P) {
        let Some(command) = self.assembler.command() else {
            return;
        };

        let Some(slot) = registry::lookup(command) else {
            if port.debug() {
                port.print(format_args!("unknown command\n"));
            }
            self.assembler.reset();
            return;
        };

        // `args` borrows `command`, which borrows `self.assembler`; keep that
        // borrow confined to the match so the `&mut self` reconfigure/reset
        // calls below are free. A parameter error reports and falls through to
        // the same reset a handled command reaches.
        let outcome = match tokenize(&command[registry::MNEMONIC_LEN..]) {
            Ok(args) => {
                let mut cx = Context {
                    port,
                    panel: &mut *panel,
                    device: &mut self.device,
                };
                self.table.get(slot).invoke(&mut cx, &args)
            }
            Err(_) => {
                if port.debug() {
                    port.print(format_args!("parameter error\n"));
                }
                Outcome::Done
            }
        };

        if let Outcome::Reconfigure(profile) = outcome {
            self.reconfigure(profile, port, panel);
        }

        self.assembler.reset();
    }

    /// Switch profiles: rebind the capability-gated slots and re-run the
    /// panel bring-up (init plus a clear to the back color).
    fn reconfigure(&mut self, profile: usize, port: &SerialPort, panel: &mut P) {
        self.device.profile = profile;
        self.table.apply_profile(&PROFILES[profile]);

        let res = panel
            .bring_up()
            .and_then(|_| panel.fill_screen(self.device.back));
        if res.is_err() && port.debug() {
            port.print(format_args!("panel error\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::mock::MockPanel;
    use std::string::String;

    /// Feed one line of input and run the dispatch cycle once per command
    fn run(dispatcher: &mut Dispatcher<MockPanel>, port: &SerialPort, panel: &mut MockPanel, input: &[u8]) {
        for &byte in input {
            port.enqueue_rx(byte).unwrap();
        }
        loop {
            dispatcher.pump(port);
            if !matches!(dispatcher.phase(), Phase::Ready) {
                break;
            }
            dispatcher.execute(port, panel);
        }
    }

    fn drain(port: &SerialPort) -> String {
        let mut out = String::new();
        while let Some(byte) = port.dequeue_tx() {
            out.push(byte as char);
        }
        out
    }

    #[test]
    fn test_clear_screen_scenario() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+cs;");

        // back color defaults to 0xFFFF
        assert_eq!(panel.calls, ["fill_screen(65535)"]);
        assert_eq!(dispatcher.phase(), Phase::Idle);
    }

    #[test]
    fn test_fill_screen_with_two_args_falls_back() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+fs=200,23;");

        // two color arguments is neither raw nor rgb form
        assert_eq!(panel.calls, ["fill_screen(65535)"]);
    }

    #[test]
    fn test_fill_screen_rgb() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+fs=200,23,123;");

        assert_eq!(panel.calls, ["fill_screen(51375)"]);
    }

    #[test]
    fn test_unknown_command_is_dropped_and_recovers() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+zz;");
        assert!(panel.calls.is_empty());
        assert_eq!(dispatcher.phase(), Phase::Idle);

        // the very next command dispatches normally
        run(&mut dispatcher, &port, &mut panel, b"AT+cs;");
        assert_eq!(panel.calls, ["fill_screen(65535)"]);
    }

    #[test]
    fn test_parameter_error_is_dropped_and_recovers() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        // missing '=' ahead of the parameter list
        run(&mut dispatcher, &port, &mut panel, b"AT+fs200;");
        assert!(panel.calls.is_empty());

        run(&mut dispatcher, &port, &mut panel, b"AT+dp=10,20;");
        assert_eq!(panel.calls, ["point(10,20,0)"]);
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+dp=10,20;");
        run(&mut dispatcher, &port, &mut panel, b"AT+dp=10,20;");

        assert_eq!(panel.calls, ["point(10,20,0)", "point(10,20,0)"]);
    }

    #[test]
    fn test_case_sensitive_dispatch() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        // upper-case SB is brightness, lower-case sb the back color
        run(&mut dispatcher, &port, &mut panel, b"AT+SB=5;");
        assert_eq!(panel.calls, ["brightness(5)"]);

        run(&mut dispatcher, &port, &mut panel, b"AT+sb=7;");
        assert_eq!(panel.calls, ["brightness(5)"]);
        assert_eq!(dispatcher.device().back, 7);
    }

    #[test]
    fn test_paint_state_flows_into_drawing() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+sf=200,23,123;");
        run(&mut dispatcher, &port, &mut panel, b"AT+dl=0,0,10,10;");

        assert_eq!(panel.calls, ["line(0,0,10,10,51375)"]);
    }

    #[test]
    fn test_framing_error_recovery() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        // 'A' then a breaking byte, then a clean command
        run(&mut dispatcher, &port, &mut panel, b"A!AT+cs;");
        assert_eq!(panel.calls, ["fill_screen(65535)"]);
    }

    #[test]
    fn test_reconfigure_unknown_profile_keeps_bindings() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+SD=NOPE;");
        assert!(panel.calls.is_empty());
        assert_eq!(dispatcher.device().profile, 0);

        // brightness still bound on the default profile
        run(&mut dispatcher, &port, &mut panel, b"AT+SB=9;");
        assert_eq!(panel.calls, ["brightness(9)"]);
    }

    #[test]
    fn test_reconfigure_rebinds_and_reruns_bring_up() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+SD=HX8347A;");
        assert_eq!(panel.calls, ["bring_up", "fill_screen(65535)"]);
        assert_eq!(dispatcher.device().profile, 1);

        // the HX8347A profile has no backlight control; the slot is parked
        panel.calls.clear();
        run(&mut dispatcher, &port, &mut panel, b"AT+SB=9;");
        assert!(panel.calls.is_empty());

        // and switching back restores it
        run(&mut dispatcher, &port, &mut panel, b"AT+SD=ST7789V;");
        panel.calls.clear();
        run(&mut dispatcher, &port, &mut panel, b"AT+SB=9;");
        assert_eq!(panel.calls, ["brightness(9)"]);
    }

    #[test]
    fn test_debug_echo_and_reports() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        // the enabling command itself is not echoed: debug was still off
        // when it reached Ready
        run(&mut dispatcher, &port, &mut panel, b"AT+DB=1;");
        assert!(port.debug());
        assert_eq!(drain(&port), "debug on\n");

        run(&mut dispatcher, &port, &mut panel, b"AT+cs;");
        assert_eq!(drain(&port), "received: AT+cs;\n");

        run(&mut dispatcher, &port, &mut panel, b"AT+zz;");
        assert_eq!(drain(&port), "received: AT+zz;\nunknown command\n");

        run(&mut dispatcher, &port, &mut panel, b"AT+DB=0;");
        assert!(!port.debug());
    }

    #[test]
    fn test_size_queries_report_profile_geometry() {
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+GX;");
        run(&mut dispatcher, &port, &mut panel, b"AT+GY;");
        assert_eq!(drain(&port), "width is 240\nheight is 320\n");
    }

    #[test]
    fn test_stalled_command_blocks_next_marker() {
        // a command that never terminates holds the assembler forever;
        // this is the documented limitation, not a defect
        let port = SerialPort::new();
        let mut panel = MockPanel::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut dispatcher, &port, &mut panel, b"AT+fs=1");
        assert_eq!(dispatcher.phase(), Phase::Accumulating);

        run(&mut dispatcher, &port, &mut panel, b"AT+cs");
        assert_eq!(dispatcher.phase(), Phase::Accumulating);
        assert!(panel.calls.is_empty());
    }
}
