//! One-shot hardware peripheral initialization.
//!
//! Configures the button inputs, indicator outputs, and the inverter UART
//! using raw ESP-IDF sys calls.  Called once from `main()` before the
//! control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_buttons()?;
        init_leds()?;
        init_uart()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Button inputs (active-low, pull-up) ───────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_buttons() -> Result<(), HwInitError> {
    let mut mask: u64 = 0;
    for &pin in &pins::BTN_GPIOS {
        mask |= 1u64 << pin;
    }
    let cfg = gpio_config_t {
        pin_bit_mask: mask,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    info!("hw_init: {} button inputs configured", pins::BTN_GPIOS.len());
    Ok(())
}

// ── Indicator outputs (active-low) ────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_leds() -> Result<(), HwInitError> {
    let mut mask: u64 = 0;
    for &pin in &pins::LED_GPIOS {
        mask |= 1u64 << pin;
    }
    let cfg = gpio_config_t {
        pin_bit_mask: mask,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    // Indicators are sink-driven: HIGH = dark.  Start with everything off.
    for &pin in &pins::LED_GPIOS {
        unsafe { gpio_set_level(pin, 1) };
    }
    info!("hw_init: {} indicator outputs configured", pins::LED_GPIOS.len());
    Ok(())
}

// ── Inverter UART ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_BUF_SIZE: i32 = 1024;

#[cfg(target_os = "espidf")]
unsafe fn init_uart() -> Result<(), HwInitError> {
    let uart_cfg = uart_config_t {
        baud_rate: pins::INVERTER_UART_BAUD as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    let ret = unsafe {
        uart_driver_install(
            pins::INVERTER_UART as i32,
            UART_BUF_SIZE * 2,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartInitFailed(ret));
    }
    let ret = unsafe { uart_param_config(pins::INVERTER_UART as i32, &uart_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartInitFailed(ret));
    }
    info!(
        "hw_init: inverter UART{} @ {} baud",
        pins::INVERTER_UART,
        pins::INVERTER_UART_BAUD
    );
    Ok(())
}

// ── Runtime GPIO / UART access ────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    // Buttons are active-low: an idle (unpressed) input reads HIGH.
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_leds(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

/// Non-blocking read of a single byte from the inverter UART.
#[cfg(target_os = "espidf")]
pub fn uart_read_byte() -> Option<u8> {
    let mut byte: u8 = 0;
    // SAFETY: uart_read_bytes with a zero timeout polls the RX FIFO of the
    // driver installed in init_uart(); main-loop only.
    let n = unsafe {
        uart_read_bytes(
            pins::INVERTER_UART as i32,
            (&raw mut byte).cast(),
            1,
            0,
        )
    };
    (n == 1).then_some(byte)
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read_byte() -> Option<u8> {
    None
}
