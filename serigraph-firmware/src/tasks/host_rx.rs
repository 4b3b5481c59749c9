//! Host link receive task - the producer side of the receive ring.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::HOST_PORT;

/// Chunk size for UART reads
const READ_CHUNK: usize = 32;

/// Host RX task - moves received bytes into the port's receive ring
#[embassy_executor::task]
pub async fn host_rx_task(mut rx: BufferedUartRx) {
    info!("Host RX task started");

    let mut buf = [0u8; READ_CHUNK];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    // a full ring drops the byte; there is no flow control
                    if HOST_PORT.enqueue_rx(byte).is_err() {
                        warn!("rx ring full, byte dropped");
                    }
                }
            }
            Ok(_) => {
                // no bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
