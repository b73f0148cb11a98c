//! Telemetry UART transmit task
//!
//! Writes each queued telemetry line followed by CRLF.

use defmt::*;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::TELEMETRY_LINES;

/// Serial TX task - drains the telemetry channel
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx<'static, UART0>) {
    info!("Serial TX task started");

    loop {
        let line = TELEMETRY_LINES.receive().await;

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send telemetry: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(b"\r\n").await {
            warn!("Failed to send telemetry: {:?}", e);
        }
    }
}
