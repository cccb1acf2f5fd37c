//! GPIO / peripheral pin assignments for the BlinkPanel board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Panel LEDs
// ---------------------------------------------------------------------------

/// Green indicator LED — digital output, active HIGH.
pub const GREEN_LED_GPIO: i32 = 10;
/// Blue LED — driven by LEDC PWM for the fade ramp and sweep pattern.
pub const PWM_LED_GPIO: i32 = 11;
/// Red indicator LED — digital output, active HIGH.
pub const RED_LED_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// User button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button. Falling-edge interrupt selects the next pattern.
pub const BUTTON_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). 10-bit gives 0 – 1023 raw duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 10;
/// LEDC base frequency for the fade LED (1 kHz — flicker-free).
pub const PWM_FREQ_HZ: u32 = 1_000;
/// Maximum comparator value accepted by the PWM interface. The panel
/// treats 0..=999 as full scale, one short of the 10-bit range.
pub const PWM_MAX_LEVEL: u16 = 999;
/// LEDC channel assigned to the fade LED.
pub const PWM_LEDC_CHANNEL: u32 = 0;
