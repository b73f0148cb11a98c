//! Display UART transmit task
//!
//! Drives a serial character terminal with ANSI escapes: clear screen and
//! cursor positioning. Rows and columns are zero-based on our side.

use core::fmt::Write as _;

use defmt::*;
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;
use heapless::String;

use crate::channels::{DisplayCommand, DISPLAY_COMMANDS};

/// Clear screen and home the cursor
const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";

/// Display TX task - renders display commands on the terminal
#[embassy_executor::task]
pub async fn display_tx_task(mut tx: BufferedUartTx<'static, UART1>) {
    info!("Display TX task started");

    if let Err(e) = tx.write_all(CLEAR_SCREEN).await {
        warn!("Failed to reset display: {:?}", e);
    }

    loop {
        let command = DISPLAY_COMMANDS.receive().await;

        let result = match command {
            DisplayCommand::Clear => tx.write_all(CLEAR_SCREEN).await,
            DisplayCommand::Line { row, col, text } => {
                let mut cursor: String<16> = String::new();
                let _ = write!(cursor, "\x1b[{};{}H", row + 1, col + 1);
                match tx.write_all(cursor.as_bytes()).await {
                    Ok(()) => tx.write_all(text.as_bytes()).await,
                    Err(e) => Err(e),
                }
            }
        };

        if let Err(e) = result {
            warn!("Failed to send display command: {:?}", e);
        }
    }
}
