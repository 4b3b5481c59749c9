//! Serigraph firmware
//!
//! AT-command display terminal for RP2040 boards: a host drives an ST7789
//! panel over UART0 with `AT+` commands. Bytes from the line land in the
//! receive ring of [`HOST_PORT`], the console task assembles and dispatches
//! them, and replies drain back out through the transmit ring.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use serigraph_core::serial::SerialPort;

use crate::st7789::St7789;

mod st7789;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// The one serial port bound to the host link.
///
/// The receive ring is written only by the host RX task and read only by
/// the console task; the transmit ring the other way around. That pairing
/// must not change.
pub static HOST_PORT: SerialPort = SerialPort::new();

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Serigraph firmware starting...");

    let p = embassy_rp::init(Default::default());

    // UART0 to the host (GP0=TX, GP1=RX), 115200 8N1
    let uart_config = UartConfig::default();

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for host communication");

    // SPI0 to the ST7789 panel (GP2=SCK, GP3=MOSI, GP5=CS, GP6=DC, GP7=RST)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 62_500_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_2, p.PIN_3, spi_config);

    let dc = Output::new(p.PIN_6, Level::Low);
    let cs = Output::new(p.PIN_5, Level::High);
    let rst = Output::new(p.PIN_7, Level::High);

    let panel = St7789::new(spi, dc, cs, rst);

    spawner.spawn(tasks::host_rx_task(rx)).unwrap();
    spawner.spawn(tasks::host_tx_task(tx)).unwrap();
    spawner.spawn(tasks::console_task(panel)).unwrap();

    info!("All tasks spawned");
}
