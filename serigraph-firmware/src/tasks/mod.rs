//! Embassy tasks wiring the serial line to the dispatcher.
//!
//! Three tasks, three contexts: `host_rx` produces into the receive ring,
//! `console` consumes it and runs the dispatcher, `host_tx` drains the
//! transmit ring back onto the line.

mod console;
mod host_rx;
mod host_tx;

pub use console::console_task;
pub use host_rx::host_rx_task;
pub use host_tx::host_tx_task;
