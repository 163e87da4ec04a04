/// Timing and range parameters for a ranging session. There is no persistent
/// configuration, everything is fixed at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub struct Settings {
    /// Width of the TRIG pulse that starts a measurement
    pub trigger_pulse_us: u32,
    /// Round trip time of sound over one centimetre, one count of range
    pub tick_us: u32,
    /// Pause between ECHO going idle and the next TRIG pulse
    pub settle_us: u32,
    /// Bound used by the bounded (non-blocking) mode, in cm
    pub max_range: u8,
    /// Main loop pause between pings
    pub ping_interval_ms: u32,
    /// Give up waiting on ECHO after this long. `None` waits forever.
    pub echo_timeout_us: Option<u32>,
    /// Granularity of the ECHO polling
    pub poll_step_us: u32,
}

impl Settings {
    /// Matches the classic HC-SR04 example: 20 us trigger, 58 us per cm,
    /// ~10 pings per second and no timeouts at all.
    pub const BASELINE: Settings = Settings {
        trigger_pulse_us: 20,
        tick_us: 58,
        settle_us: 1_000,
        max_range: 90,
        ping_interval_ms: 100,
        echo_timeout_us: None,
        poll_step_us: 10,
    };

    /// Same as [`Settings::BASELINE`] but a sensor that never answers is
    /// reported instead of hanging the loop. The HC-SR04 raises ECHO well
    /// within a millisecond of the trigger and its longest pulse is ~38 ms.
    pub const DEFAULT: Settings = Settings {
        echo_timeout_us: Some(30_000),
        ..Settings::BASELINE
    };

    pub const fn with_echo_timeout(self, echo_timeout_us: Option<u32>) -> Self {
        Settings {
            echo_timeout_us,
            ..self
        }
    }

    pub const fn with_max_range(self, max_range: u8) -> Self {
        Settings { max_range, ..self }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::DEFAULT
    }
}
