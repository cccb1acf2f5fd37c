//! One-shot hardware peripheral initialization and raw output writes.
//!
//! Configures GPIO directions, the button interrupt line, and the LEDC
//! PWM timer/channel using raw ESP-IDF sys calls. Called once from
//! `main()` before any task starts.
//!
//! The write helpers (`gpio_set`, `ledc_set`) are stateless
//! single-register operations with no failure mode; on host targets
//! they track the panel state in atomics so tests can observe actuator
//! mutations without real peripherals.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization. All fatal at
/// startup — the bootstrap halts rather than run a half-wired panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    IsrServiceFailed(i32),
    IsrHandlerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::IsrServiceFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerFailed(rc) => write!(f, "button ISR handler add failed (rc={})", rc),
        }
    }
}

// ── Initialization ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before any task starts; single-threaded.
    unsafe {
        init_gpio()?;
        init_ledc()?;
    }
    info!("hw_init: panel peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio() -> Result<(), HwInitError> {
    // LED outputs.
    let out_cfg = gpio_config_t {
        pin_bit_mask: (1u64 << pins::GREEN_LED_GPIO) | (1u64 << pins::RED_LED_GPIO),
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&out_cfg) };
    if ret != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    // Button input: active-low, pull-up, falling-edge interrupt.
    let btn_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    let ret = unsafe { gpio_config(&btn_cfg) };
    if ret != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    let timer_cfg = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        duty_resolution: pins::PWM_RESOLUTION_BITS,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        freq_hz: pins::PWM_FREQ_HZ,
        clk_cfg: ledc_clk_cfg_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer_cfg) };
    if ret != ESP_OK {
        return Err(HwInitError::LedcInitFailed(ret));
    }

    let chan_cfg = ledc_channel_config_t {
        gpio_num: pins::PWM_LED_GPIO,
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: pins::PWM_LEDC_CHANNEL,
        intr_type: ledc_intr_type_t_LEDC_INTR_DISABLE,
        timer_sel: ledc_timer_t_LEDC_TIMER_0,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    };
    let ret = unsafe { ledc_channel_config(&chan_cfg) };
    if ret != ESP_OK {
        return Err(HwInitError::LedcInitFailed(ret));
    }
    Ok(())
}

/// Install the shared GPIO ISR service. Per-pin handlers are added by
/// [`button_isr::install`](crate::drivers::button_isr::install).
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    let ret = unsafe { gpio_install_isr_service(0) };
    if ret != ESP_OK {
        return Err(HwInitError::IsrServiceFailed(ret));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    Ok(())
}

// ── Output writes ─────────────────────────────────────────────
//
// Ownership discipline: these are raw register writes with no locking.
// At any instant each output has exactly one logical owner — a periodic
// task, or the pattern executor while it holds the ActuatorClaim. The
// pause protocol, not a mutex, is what makes concurrent calls here
// impossible.

#[cfg(target_os = "espidf")]
pub fn gpio_set(gpio: i32, on: bool) {
    unsafe {
        gpio_set_level(gpio, u32::from(on));
    }
}

#[cfg(target_os = "espidf")]
pub fn gpio_state(gpio: i32) -> bool {
    unsafe { gpio_get_level(gpio) != 0 }
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(duty: u16) {
    let duty = duty.min(pins::PWM_MAX_LEVEL);
    unsafe {
        ledc_set_duty(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            pins::PWM_LEDC_CHANNEL,
            u32::from(duty),
        );
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::PWM_LEDC_CHANNEL);
    }
}

#[cfg(target_os = "espidf")]
pub fn ledc_duty() -> u16 {
    unsafe { ledc_get_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::PWM_LEDC_CHANNEL) as u16 }
}

// ── Host simulation ───────────────────────────────────────────
//
// The panel state lives in atomics so integration tests can assert on
// actuator mutations (and their absence while the executor holds the
// claim) with the real drivers and real threads.

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicBool, AtomicU16};

    pub static GREEN: AtomicBool = AtomicBool::new(false);
    pub static RED: AtomicBool = AtomicBool::new(false);
    pub static DUTY: AtomicU16 = AtomicU16::new(0);
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set(gpio: i32, on: bool) {
    use core::sync::atomic::Ordering;
    match gpio {
        g if g == pins::GREEN_LED_GPIO => sim::GREEN.store(on, Ordering::Release),
        g if g == pins::RED_LED_GPIO => sim::RED.store(on, Ordering::Release),
        _ => log::debug!("gpio_set(sim): unmapped gpio {}", gpio),
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_state(gpio: i32) -> bool {
    use core::sync::atomic::Ordering;
    match gpio {
        g if g == pins::GREEN_LED_GPIO => sim::GREEN.load(Ordering::Acquire),
        g if g == pins::RED_LED_GPIO => sim::RED.load(Ordering::Acquire),
        _ => false,
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(duty: u16) {
    use core::sync::atomic::Ordering;
    sim::DUTY.store(duty.min(pins::PWM_MAX_LEVEL), Ordering::Release);
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_duty() -> u16 {
    use core::sync::atomic::Ordering;
    sim::DUTY.load(Ordering::Acquire)
}
