//! Driven adapters — concrete implementations of the port traits in
//! [`crate::app::ports`], bridging the domain core to GPIO, UART, NVS,
//! and the log.

pub mod hardware;
pub mod inverter_link;
pub mod log_sink;
pub mod nvs;
pub mod time;
