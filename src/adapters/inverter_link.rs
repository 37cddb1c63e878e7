//! UART link to the inverter module (MI).
//!
//! Implements [`InverterPort`] over the panel's UART.  The current board
//! revision shares UART0 with the console, so outbound commands are
//! written as readable `CMD | VAL` lines; the inverter side only parses
//! the pair.  Inbound traffic is a single confirmation byte per message
//! ('L' = drain start confirmed, 'F' = drain finished) — the poll reads at
//! most one byte per tick with zero timeout and drops anything older.
//!
//! On non-espidf targets the RX side always reads empty; tests use the
//! mock link instead.

use log::info;

use crate::app::commands::InverterCommand;
use crate::app::ports::InverterPort;
use crate::drivers::hw_init;

/// Adapter that owns the inverter-facing UART.
pub struct UartInverterLink {
    /// Commands written since boot (diagnostics counter).
    sent: u32,
}

impl UartInverterLink {
    pub fn new() -> Self {
        Self { sent: 0 }
    }

    /// Number of commands transmitted since boot.
    pub fn sent_count(&self) -> u32 {
        self.sent
    }
}

impl Default for UartInverterLink {
    fn default() -> Self {
        Self::new()
    }
}

impl InverterPort for UartInverterLink {
    fn send(&mut self, cmd: InverterCommand) {
        self.sent = self.sent.wrapping_add(1);
        // The console log IS the wire on this board revision: the MI link
        // parses the same `CMD | VAL` line the operator sees.
        info!("MI <- CMD: {} | VAL: {}", cmd.mnemonic(), cmd.value());
    }

    fn poll_confirmation(&mut self) -> Option<char> {
        hw_init::uart_read_byte().map(char::from)
    }
}
