//! Console task - the cooperative main loop.
//!
//! The receive ring is drained here and nowhere else; the paired producer
//! is the host RX task.

use defmt::*;
use embassy_time::Timer;

use serigraph_core::dispatch::Dispatcher;
use serigraph_core::panel::Panel;

use crate::st7789::St7789;
use crate::HOST_PORT;

/// Console task - assembles and dispatches commands against the panel
#[embassy_executor::task]
pub async fn console_task(mut panel: St7789<'static>) {
    info!("Console task started");

    let mut dispatcher = Dispatcher::new();

    // power-on bring-up: init plus a clear to the back color
    let back = dispatcher.device().back;
    if panel
        .bring_up()
        .and_then(|_| panel.fill_screen(back))
        .is_err()
    {
        warn!("panel bring-up failed");
    }

    loop {
        dispatcher.pump(&HOST_PORT);
        dispatcher.execute(&HOST_PORT, &mut panel);
        Timer::after_millis(1).await;
    }
}
