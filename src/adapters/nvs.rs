//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`ConfigPort`] (the panel configuration blob) and
//! [`ResetPort`] (factory reset: erase the NVS partition and restart).
//!
//! - Config validation: all fields are range-checked before persistence.
//! - Atomic writes: ESP-IDF NVS commits are atomic per `nvs_commit()`.
//! - The simulation backend keeps the blob in memory (dev/test only).

use crate::app::ports::{ConfigError, ConfigPort, ResetPort};
use crate::config::HmiConfig;
use log::{info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

const CONFIG_NAMESPACE: &str = "climahmi";
const CONFIG_KEY: &str = "panelcfg";

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: std::cell::RefCell<Option<Vec<u8>>>,
}

impl NvsAdapter {
    /// Create a new NvsAdapter and initialise NVS flash.
    ///
    /// Returns `Err(ConfigError::IoError)` if flash initialisation fails
    /// unrecoverably. On first boot or after a version mismatch the NVS
    /// partition is erased and re-initialised automatically.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any concurrent NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                let ret2 = unsafe { nvs_flash_erase() };
                if ret2 != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                let ret3 = unsafe { nvs_flash_init() };
                if ret3 != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: std::cell::RefCell::new(None),
        })
    }

    #[cfg(target_os = "espidf")]
    fn open_namespace(write: bool) -> Result<nvs_handle_t, ConfigError> {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = CONFIG_NAMESPACE.as_bytes();
        ns_buf[..ns_bytes.len()].copy_from_slice(ns_bytes);

        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let mut handle: nvs_handle_t = 0;
        // SAFETY: ns_buf is NUL-terminated (zero-initialised, namespace < 16 bytes).
        let ret = unsafe { nvs_open(ns_buf.as_ptr().cast(), mode, &mut handle) };
        match ret {
            x if x == ESP_OK => Ok(handle),
            x if x == ESP_ERR_NVS_NOT_FOUND => Err(ConfigError::NotFound),
            _ => Err(ConfigError::IoError),
        }
    }
}

fn validate_config(cfg: &HmiConfig) -> Result<(), ConfigError> {
    if cfg.debounce_ms == 0 || cfg.debounce_ms > 1000 {
        return Err(ConfigError::ValidationFailed("debounce_ms must be 1–1000"));
    }
    if cfg.long_press_ms <= cfg.debounce_ms {
        return Err(ConfigError::ValidationFailed(
            "long_press_ms must exceed debounce_ms",
        ));
    }
    if cfg.factory_reset_hold_ms <= cfg.long_press_ms {
        return Err(ConfigError::ValidationFailed(
            "factory_reset_hold_ms must exceed long_press_ms",
        ));
    }
    if cfg.repeat_rate_ms == 0 || cfg.repeat_rate_ms >= cfg.repeat_delay_ms {
        return Err(ConfigError::ValidationFailed(
            "repeat_rate_ms must be non-zero and below repeat_delay_ms",
        ));
    }
    if cfg.freq_min >= cfg.freq_max {
        return Err(ConfigError::ValidationFailed(
            "freq_min must be below freq_max",
        ));
    }
    if cfg.menu_param_slots == 0 {
        return Err(ConfigError::ValidationFailed(
            "menu_param_slots must be at least 1",
        ));
    }
    if cfg.control_loop_interval_ms == 0 || cfg.control_loop_interval_ms >= cfg.debounce_ms {
        return Err(ConfigError::ValidationFailed(
            "control_loop_interval_ms must be non-zero and below debounce_ms",
        ));
    }
    Ok(())
}

// ── ConfigPort ────────────────────────────────────────────────

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<HmiConfig, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            let handle = Self::open_namespace(false)?;
            let mut key_buf = [0u8; 16];
            key_buf[..CONFIG_KEY.len()].copy_from_slice(CONFIG_KEY.as_bytes());

            let mut len: usize = 0;
            // SAFETY: handle is open; key_buf is NUL-terminated.
            let ret = unsafe {
                nvs_get_blob(handle, key_buf.as_ptr().cast(), core::ptr::null_mut(), &mut len)
            };
            if ret == ESP_ERR_NVS_NOT_FOUND {
                unsafe { nvs_close(handle) };
                return Err(ConfigError::NotFound);
            }
            if ret != ESP_OK || len == 0 || len > 256 {
                unsafe { nvs_close(handle) };
                return Err(ConfigError::Corrupted);
            }

            let mut buf = vec![0u8; len];
            let ret = unsafe {
                nvs_get_blob(handle, key_buf.as_ptr().cast(), buf.as_mut_ptr().cast(), &mut len)
            };
            unsafe { nvs_close(handle) };
            if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }

            let cfg: HmiConfig =
                postcard::from_bytes(&buf).map_err(|_| ConfigError::Corrupted)?;
            validate_config(&cfg)?;
            Ok(cfg)
        }

        #[cfg(not(target_os = "espidf"))]
        {
            match self.store.borrow().as_deref() {
                Some(bytes) => {
                    let cfg: HmiConfig =
                        postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
                    validate_config(&cfg)?;
                    Ok(cfg)
                }
                None => Err(ConfigError::NotFound),
            }
        }
    }

    fn save(&self, config: &HmiConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;

        #[cfg(target_os = "espidf")]
        {
            let handle = Self::open_namespace(true)?;
            let mut key_buf = [0u8; 16];
            key_buf[..CONFIG_KEY.len()].copy_from_slice(CONFIG_KEY.as_bytes());

            // SAFETY: handle is open read-write; blob pointer/len are valid.
            let ret = unsafe {
                nvs_set_blob(
                    handle,
                    key_buf.as_ptr().cast(),
                    bytes.as_ptr().cast(),
                    bytes.len(),
                )
            };
            if ret != ESP_OK {
                unsafe { nvs_close(handle) };
                return Err(ConfigError::IoError);
            }
            let ret = unsafe { nvs_commit(handle) };
            unsafe { nvs_close(handle) };
            if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            info!("NvsAdapter: config saved ({} bytes)", bytes.len());
            Ok(())
        }

        #[cfg(not(target_os = "espidf"))]
        {
            *self.store.borrow_mut() = Some(bytes);
            Ok(())
        }
    }
}

// ── ResetPort ─────────────────────────────────────────────────

impl ResetPort for NvsAdapter {
    /// Erase the entire NVS partition and restart the device.  On hardware
    /// this does not return; the simulation backend just clears the store.
    fn factory_reset(&mut self) {
        warn!("FACTORY RESET: erasing NVS and restarting");

        #[cfg(target_os = "espidf")]
        // SAFETY: called from the single main-task context as the final
        // action before restart; no NVS handles remain open.
        unsafe {
            nvs_flash_erase();
            esp_restart();
        }

        #[cfg(not(target_os = "espidf"))]
        {
            *self.store.borrow_mut() = None;
        }
    }
}
