//! Host link transmit task - the drain side of the transmit ring.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use crate::HOST_PORT;

/// Host TX task - moves queued bytes from the transmit ring onto the line
#[embassy_executor::task]
pub async fn host_tx_task(mut tx: BufferedUartTx) {
    info!("Host TX task started");

    let mut ticker = Ticker::every(Duration::from_millis(1));
    let mut out = [0u8; 64];

    loop {
        let mut n = 0;
        while n < out.len() {
            match HOST_PORT.dequeue_tx() {
                Some(byte) => {
                    out[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }

        if n > 0 {
            if let Err(e) = tx.write_all(&out[..n]).await {
                warn!("UART write error: {:?}", e);
            }
        } else {
            ticker.next().await;
        }
    }
}
