use embedded_hal::{
    blocking::delay::DelayUs,
    digital::v2::{InputPin, OutputPin},
};

use crate::logic::{settings::Settings, ticks::Ticks};

/// Outcome of one ranging cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum Range {
    /// Distance to the closest target, in cm. Saturates at 255.
    Target(u8),
    /// The range limit was reached while ECHO was still high
    OutOfRange,
}

impl Range {
    /// The single byte reading of the classic sonar routine, where 0 stands
    /// for "nothing in range"
    pub fn sentinel(self) -> u8 {
        match self {
            Range::Target(cm) => cm,
            Range::OutOfRange => 0,
        }
    }
}

/// What we were waiting for when giving up
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum Phase {
    /// ECHO of the previous measurement to end
    EchoIdle,
    /// ECHO to go high after the trigger pulse
    EchoStart,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    Pin(E),
    Timeout(Phase),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Pin(e)
    }
}

// HAL pin errors usually aren't `Format` (the nrf ones are `Void`), so this
// can't be derived
impl<E> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Pin(_) => defmt::write!(f, "GPIO error"),
            Error::Timeout(phase) => defmt::write!(f, "timed out waiting for {}", phase),
        }
    }
}

/// HC-SR04 style ultrasonic ranger. Range is measured by counting fixed
/// length ticks while ECHO is high, one tick per centimetre, so there's no
/// conversion from microseconds to do afterwards.
pub struct Sonar<Trig, Echo> {
    trig: Trig,
    echo: Echo,
    settings: Settings,
    // Last measurement returned while ECHO was still high
    echo_pending: bool,
}

impl<Trig, Echo, E> Sonar<Trig, Echo>
where
    Trig: OutputPin<Error = E>,
    Echo: InputPin<Error = E>,
{
    pub fn new(mut trig: Trig, echo: Echo, settings: Settings) -> Result<Self, E> {
        trig.set_low()?;
        Ok(Sonar {
            trig,
            echo,
            settings,
            echo_pending: false,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The sensor can be triggered again. A measurement that gave up on a
    /// distant target leaves ECHO high until the sensor is done listening.
    pub fn is_ready(&self) -> Result<bool, E> {
        self.echo.is_low()
    }

    /// Get the range to the closest target.
    ///
    /// With `max_range` set the measurement stops as soon as the count
    /// reaches it and `Range::OutOfRange` is returned without waiting for
    /// ECHO to end. Because of that, every measurement first waits for the
    /// previous ECHO pulse to finish and lets the sensor settle before the
    /// trigger. Without `max_range` this blocks until ECHO ends (at most
    /// ~38 ms for an HC-SR04).
    pub fn measure_range<D, T>(
        &mut self,
        delay: &mut D,
        ticks: &mut T,
        max_range: Option<u8>,
    ) -> Result<Range, Error<E>>
    where
        D: DelayUs<u32>,
        T: Ticks,
    {
        // The sensor ignores TRIG while it's still listening
        let echo_busy = self.echo_pending || self.echo.is_high()?;
        self.wait_for_echo(false, delay, Phase::EchoIdle)?;
        self.echo_pending = false;
        if echo_busy || max_range.is_some() {
            delay.delay_us(self.settings.settle_us);
        }

        self.trig.set_high()?;
        delay.delay_us(self.settings.trigger_pulse_us);
        self.trig.set_low()?;

        self.wait_for_echo(true, delay, Phase::EchoStart)?;

        // ECHO is high now, so there's always at least one tick
        ticks.begin(self.settings.tick_us);
        let mut range: u8 = 0;
        loop {
            ticks.wait_tick();
            range = range.saturating_add(1);
            if let Some(max_range) = max_range {
                if range >= max_range {
                    self.echo_pending = true;
                    return Ok(Range::OutOfRange);
                }
            }
            if self.echo.is_low()? {
                break;
            }
        }

        Ok(Range::Target(range))
    }

    /// Same as [`Sonar::measure_range()`], but folds `OutOfRange` into 0
    pub fn range_cm<D, T>(
        &mut self,
        delay: &mut D,
        ticks: &mut T,
        max_range: Option<u8>,
    ) -> Result<u8, Error<E>>
    where
        D: DelayUs<u32>,
        T: Ticks,
    {
        self.measure_range(delay, ticks, max_range).map(Range::sentinel)
    }

    fn wait_for_echo<D>(
        &mut self,
        high: bool,
        delay: &mut D,
        phase: Phase,
    ) -> Result<(), Error<E>>
    where
        D: DelayUs<u32>,
    {
        let step = self.settings.poll_step_us.max(1);
        let mut waited: u32 = 0;
        while self.echo.is_high()? != high {
            if let Some(timeout_us) = self.settings.echo_timeout_us {
                if waited >= timeout_us {
                    return Err(Error::Timeout(phase));
                }
            }
            delay.delay_us(step);
            waited = waited.saturating_add(step);
        }
        Ok(())
    }
}
