//! Serial port object.
//!
//! One port per physical line: a receive ring written by the
//! interrupt-context producer and read by the main loop, a transmit ring
//! written by the main loop and drained by the interrupt context, and a
//! debug flag gating diagnostic output. Ports are created once (typically as
//! a `static`) and live for the life of the process.

use core::fmt::{self, Write};

use portable_atomic::{AtomicBool, Ordering};

use crate::ring::{Overrun, RingBuffer};

/// Ring capacity per direction; one slot stays unusable
pub const SERIAL_BUFFER_SIZE: usize = 64;

/// Scratch for one formatted diagnostic line; longer output is truncated
pub const SCRATCH_SIZE: usize = 64;

/// Bidirectional serial channel over two SPSC rings
pub struct SerialPort {
    rx: RingBuffer<SERIAL_BUFFER_SIZE>,
    tx: RingBuffer<SERIAL_BUFFER_SIZE>,
    debug: AtomicBool,
}

impl Default for SerialPort {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialPort {
    /// Create an idle port with debug reporting off
    pub const fn new() -> Self {
        Self {
            rx: RingBuffer::new(),
            tx: RingBuffer::new(),
            debug: AtomicBool::new(false),
        }
    }

    // ---- main-loop side ----

    /// Non-blocking read of one received byte
    pub fn read_byte(&self) -> Option<u8> {
        self.rx.pop()
    }

    /// Queue one byte for transmit, spinning while the ring is full.
    ///
    /// The drain context empties the ring at line rate, which bounds the
    /// spin. Must never be called from the drain context itself.
    pub fn write_byte(&self, byte: u8) {
        while self.tx.push(byte).is_err() {
            core::hint::spin_loop();
        }
    }

    /// Queue a string for transmit
    pub fn write_str(&self, s: &str) {
        for &byte in s.as_bytes() {
            self.write_byte(byte);
        }
    }

    /// Formatted output through a bounded scratch buffer.
    ///
    /// Anything beyond [`SCRATCH_SIZE`] rendered bytes is silently dropped.
    pub fn print(&self, args: fmt::Arguments<'_>) {
        let mut scratch = Scratch::new();
        // truncation is not an error here
        let _ = scratch.write_fmt(args);
        for &byte in scratch.rendered() {
            self.write_byte(byte);
        }
    }

    /// Toggle diagnostic verbosity
    pub fn set_debug(&self, on: bool) {
        self.debug.store(on, Ordering::Relaxed);
        if on {
            self.print(format_args!("debug on\n"));
        }
    }

    /// Whether diagnostic output is enabled
    pub fn debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    // ---- line-driver side ----

    /// Producer-context entry: deliver one byte received from the line.
    ///
    /// On a full ring the byte is dropped; there is no flow control to
    /// signal.
    pub fn enqueue_rx(&self, byte: u8) -> Result<(), Overrun> {
        self.rx.push(byte)
    }

    /// Drain-context entry: take the next byte to put on the line
    pub fn dequeue_tx(&self) -> Option<u8> {
        self.tx.pop()
    }
}

/// Fixed scratch that drops bytes past its capacity instead of failing
struct Scratch {
    buf: [u8; SCRATCH_SIZE],
    len: usize,
}

impl Scratch {
    fn new() -> Self {
        Self {
            buf: [0; SCRATCH_SIZE],
            len: 0,
        }
    }

    fn rendered(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl fmt::Write for Scratch {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = SCRATCH_SIZE - self.len;
        let take = s.len().min(room);
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;

    fn drain(port: &SerialPort) -> String {
        let mut out = String::new();
        while let Some(byte) = port.dequeue_tx() {
            out.push(byte as char);
        }
        out
    }

    #[test]
    fn test_rx_path() {
        let port = SerialPort::new();
        assert_eq!(port.read_byte(), None);

        port.enqueue_rx(b'A').unwrap();
        port.enqueue_rx(b'T').unwrap();
        assert_eq!(port.read_byte(), Some(b'A'));
        assert_eq!(port.read_byte(), Some(b'T'));
        assert_eq!(port.read_byte(), None);
    }

    #[test]
    fn test_tx_path() {
        let port = SerialPort::new();
        port.write_str("ok\n");
        assert_eq!(drain(&port), "ok\n");
    }

    #[test]
    fn test_print_formats() {
        let port = SerialPort::new();
        port.print(format_args!("width is {}\n", 240));
        assert_eq!(drain(&port), "width is 240\n");
    }

    #[test]
    fn test_debug_flag() {
        let port = SerialPort::new();
        assert!(!port.debug());

        port.set_debug(true);
        assert!(port.debug());
        assert_eq!(drain(&port), "debug on\n");

        port.set_debug(false);
        assert!(!port.debug());
        assert_eq!(drain(&port), "");
    }

    #[test]
    fn test_scratch_truncates() {
        let mut scratch = Scratch::new();
        for _ in 0..10 {
            scratch.write_str("0123456789").unwrap();
        }
        assert_eq!(scratch.rendered().len(), SCRATCH_SIZE);
        assert_eq!(&scratch.rendered()[..10], b"0123456789");
    }
}
