//! Climatizador HMI Firmware — Main Entry Point
//!
//! Hexagonal architecture around a fixed-cadence control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  PanelAdapter        UartInverterLink    NvsAdapter            │
//! │  (Input+PanelPort)   (InverterPort)      (Config+ResetPort)    │
//! │  LogEventSink        Esp32TimeAdapter                          │
//! │  (EventSink)         (monotonic clock)                         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              HmiService (pure logic)                   │    │
//! │  │  InputClassifier · ApplianceController                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every tick: sample buttons → classify → appliance step → flush inverter
//! commands → refresh indicators → feed watchdog → sleep.

#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod pins;

pub mod app;
mod adapters;
pub mod controller;
mod drivers;
pub mod input;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::PanelAdapter;
use adapters::inverter_link::UartInverterLink;
use adapters::log_sink::LogEventSink;
use adapters::nvs::NvsAdapter;
use adapters::time::Esp32TimeAdapter;
use app::ports::{ConfigPort, ResetPort};
use app::service::HmiService;
use config::HmiConfig;
use drivers::watchdog::Watchdog;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Climatizador HMI v{}              ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = Watchdog::new();

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let mut nvs = match NvsAdapter::new() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            // Continue without NVS — factory reset will be unavailable this
            // session.  On next reboot, NVS should self-heal.
            None
        }
    };
    let config = match nvs.as_ref().map(ConfigPort::load) {
        Some(Ok(cfg)) => {
            info!("Config loaded from NVS");
            cfg
        }
        Some(Err(e)) => {
            warn!("NVS config load failed ({}), using defaults", e);
            HmiConfig::default()
        }
        None => HmiConfig::default(),
    };

    // ── 4. Construct adapters ─────────────────────────────────
    let time = Esp32TimeAdapter::new();
    let mut panel = PanelAdapter::new();
    let mut link = UartInverterLink::new();
    let mut sink = LogEventSink::new();

    // ── 5. Construct the HMI service ──────────────────────────
    let mut service = HmiService::new(&config);
    service.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        let now_ms = time.uptime_ms();
        let outcome = service.tick(now_ms, &mut panel, &mut link, &mut sink);

        if outcome.factory_reset {
            match nvs.as_mut() {
                // Erases NVS and restarts — does not return on hardware.
                Some(nvs) => nvs.factory_reset(),
                None => warn!("factory reset requested but NVS is unavailable"),
            }
        }

        watchdog.feed();

        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(config.control_loop_interval_ms);

        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.control_loop_interval_ms,
        )));
    }
}
