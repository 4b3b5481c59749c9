//! Byte-at-a-time assembly of one command.
//!
//! A command travels as `AT+<code>[=<params>];`. The assembler consumes one
//! byte per call and holds exactly one command: the start marker must match
//! byte for byte, `\0` and `\n` are transparent once it has, and a complete
//! command stays in [`Phase::Ready`] until the dispatcher consumes it and
//! calls [`Assembler::reset`].

use heapless::Vec;

/// Maximum assembled command length, start marker through terminator
pub const MAX_COMMAND_LEN: usize = 200;

/// Command terminator byte
pub const TERMINATOR: u8 = b';';

/// Externally visible assembler phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Start marker not fully matched yet
    Idle,
    /// Start marker matched, terminator pending
    Accumulating,
    /// Complete command buffered, waiting for dispatch
    Ready,
}

/// Errors that discard the partial command and reset the assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssembleError {
    /// A byte broke the `AT+` start marker; the partial prefix is discarded
    Prefix,
    /// The command exceeded [`MAX_COMMAND_LEN`]; the buffer is discarded
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Matching the start marker; tracks how much of `AT+` has been seen
    Idle(Prefix),
    Accumulating,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Empty,
    SeenA,
    SeenAt,
}

/// State machine accumulating one command
#[derive(Debug, Clone)]
pub struct Assembler {
    state: State,
    buf: Vec<u8, MAX_COMMAND_LEN>,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// Create an idle assembler
    pub const fn new() -> Self {
        Self {
            state: State::Idle(Prefix::Empty),
            buf: Vec::new(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle(_) => Phase::Idle,
            State::Accumulating => Phase::Accumulating,
            State::Ready => Phase::Ready,
        }
    }

    /// True once a complete command is buffered
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready)
    }

    /// The buffered command, marker through terminator, once Ready
    pub fn command(&self) -> Option<&[u8]> {
        match self.state {
            State::Ready => Some(&self.buf),
            _ => None,
        }
    }

    /// Discard the buffer and return to Idle, ready for the next command
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = State::Idle(Prefix::Empty);
    }

    /// Feed a single byte.
    ///
    /// Returns the phase after the byte is consumed. A byte that breaks the
    /// start marker discards the partial prefix; if that byte is itself `A`
    /// it starts the next marker attempt, so a command following garbage is
    /// still picked up. Bytes fed while Ready are ignored: the caller must
    /// stop offering input until it has consumed the command and reset.
    pub fn feed(&mut self, byte: u8) -> Result<Phase, AssembleError> {
        match self.state {
            State::Idle(prefix) => match (prefix, byte) {
                (Prefix::Empty, b'A') => {
                    // cannot fail, the buffer is empty
                    let _ = self.buf.push(byte);
                    self.state = State::Idle(Prefix::SeenA);
                }
                (Prefix::Empty, _) => {
                    // line noise ahead of the marker, ignore
                }
                (Prefix::SeenA, b'T') => {
                    let _ = self.buf.push(byte);
                    self.state = State::Idle(Prefix::SeenAt);
                }
                (Prefix::SeenAt, b'+') => {
                    let _ = self.buf.push(byte);
                    self.state = State::Accumulating;
                }
                (_, _) => {
                    self.buf.clear();
                    if byte == b'A' {
                        let _ = self.buf.push(byte);
                        self.state = State::Idle(Prefix::SeenA);
                    } else {
                        self.state = State::Idle(Prefix::Empty);
                    }
                    return Err(AssembleError::Prefix);
                }
            },
            State::Accumulating => match byte {
                // transparent framing noise after the marker
                b'\0' | b'\n' => {}
                _ => {
                    if self.buf.push(byte).is_err() {
                        self.reset();
                        return Err(AssembleError::Overflow);
                    }
                    if byte == TERMINATOR {
                        self.state = State::Ready;
                    }
                }
            },
            State::Ready => {}
        }
        Ok(self.phase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed_all(asm: &mut Assembler, bytes: &[u8]) {
        for &b in bytes {
            let _ = asm.feed(b);
        }
    }

    #[test]
    fn test_command_byte_by_byte() {
        let mut asm = Assembler::new();
        assert_eq!(asm.feed(b'A'), Ok(Phase::Idle));
        assert_eq!(asm.feed(b'T'), Ok(Phase::Idle));
        assert_eq!(asm.feed(b'+'), Ok(Phase::Accumulating));
        assert_eq!(asm.feed(b'c'), Ok(Phase::Accumulating));
        assert_eq!(asm.feed(b's'), Ok(Phase::Accumulating));
        assert_eq!(asm.feed(b';'), Ok(Phase::Ready));
        assert_eq!(asm.command(), Some(b"AT+cs;".as_slice()));
    }

    #[test]
    fn test_noise_before_marker_is_ignored() {
        let mut asm = Assembler::new();
        for &b in b"xy\x12\x00" {
            assert_eq!(asm.feed(b), Ok(Phase::Idle));
        }
        feed_all(&mut asm, b"AT+cs;");
        assert_eq!(asm.command(), Some(b"AT+cs;".as_slice()));
    }

    #[test]
    fn test_prefix_break_discards_and_reports() {
        let mut asm = Assembler::new();
        assert_eq!(asm.feed(b'A'), Ok(Phase::Idle));
        assert_eq!(asm.feed(b'T'), Ok(Phase::Idle));
        assert_eq!(asm.feed(b'q'), Err(AssembleError::Prefix));
        assert_eq!(asm.phase(), Phase::Idle);

        // detection recovers on the next clean marker
        feed_all(&mut asm, b"AT+fs=1;");
        assert_eq!(asm.command(), Some(b"AT+fs=1;".as_slice()));
    }

    #[test]
    fn test_marker_resync_on_a() {
        // the breaking byte is itself the start of the real marker
        let mut asm = Assembler::new();
        feed_all(&mut asm, b"ATAT+cs;");
        assert_eq!(asm.command(), Some(b"AT+cs;".as_slice()));

        let mut asm = Assembler::new();
        feed_all(&mut asm, b"AAT+cs;");
        assert_eq!(asm.command(), Some(b"AT+cs;".as_slice()));
    }

    #[test]
    fn test_dropped_byte_mid_marker_recovers() {
        // a receive overrun that eats the '+' must not poison detection of
        // the next command
        let mut asm = Assembler::new();
        feed_all(&mut asm, b"ATcs;");
        assert_eq!(asm.phase(), Phase::Idle);

        feed_all(&mut asm, b"AT+cs;");
        assert_eq!(asm.command(), Some(b"AT+cs;".as_slice()));
    }

    #[test]
    fn test_transparent_bytes_in_body() {
        let mut asm = Assembler::new();
        feed_all(&mut asm, b"AT+f\ns=2\x0000,23;");
        assert_eq!(asm.command(), Some(b"AT+fs=200,23;".as_slice()));
    }

    #[test]
    fn test_ready_refuses_input_until_reset() {
        let mut asm = Assembler::new();
        feed_all(&mut asm, b"AT+cs;");
        assert!(asm.is_ready());

        assert_eq!(asm.feed(b'X'), Ok(Phase::Ready));
        assert_eq!(asm.command(), Some(b"AT+cs;".as_slice()));

        asm.reset();
        assert_eq!(asm.phase(), Phase::Idle);
        assert_eq!(asm.command(), None);
    }

    #[test]
    fn test_overflow_resets() {
        let mut asm = Assembler::new();
        feed_all(&mut asm, b"AT+");

        let mut overflowed = false;
        for _ in 0..MAX_COMMAND_LEN {
            if asm.feed(b'a') == Err(AssembleError::Overflow) {
                overflowed = true;
                break;
            }
        }
        assert!(overflowed);
        assert_eq!(asm.phase(), Phase::Idle);

        // a fresh command parses after the overflow
        feed_all(&mut asm, b"AT+cs;");
        assert_eq!(asm.command(), Some(b"AT+cs;".as_slice()));
    }

    proptest! {
        /// Any stream of [noise][AT+ body ;] reaches Ready holding the
        /// command exactly, minus the transparent `\0`/`\n` bytes.
        #[test]
        fn test_reconstructs_embedded_command(
            noise in proptest::collection::vec(proptest::num::u8::ANY, 0..32),
            body in proptest::collection::vec(proptest::num::u8::ANY, 0..64),
        ) {
            // keep the noise from starting a marker and the body from
            // terminating early
            let noise: std::vec::Vec<u8> =
                noise.into_iter().filter(|&b| b != b'A').collect();
            let body: std::vec::Vec<u8> =
                body.into_iter().filter(|&b| b != TERMINATOR).collect();

            let mut asm = Assembler::new();
            feed_all(&mut asm, &noise);
            feed_all(&mut asm, b"AT+");
            feed_all(&mut asm, &body);
            let _ = asm.feed(TERMINATOR);

            let mut expected = std::vec::Vec::new();
            expected.extend_from_slice(b"AT+");
            expected.extend(body.iter().copied().filter(|&b| b != b'\0' && b != b'\n'));
            expected.push(TERMINATOR);

            prop_assert_eq!(asm.command(), Some(expected.as_slice()));
        }
    }
}
