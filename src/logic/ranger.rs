use embedded_hal::{
    blocking::delay::DelayUs,
    digital::v2::{InputPin, OutputPin},
};

use crate::{
    logic::{display::Level, ticks::Ticks},
    peripherals::{
        led::LedBank,
        sonar::{Error, Range, Sonar},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum Mode {
    /// Every measurement waits for ECHO to end, however far the target
    Blocking,
    /// Targets beyond the limit (cm) are reported as out of range right away
    /// and the sensor is only triggered again once it's ready
    Bounded(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum Poll {
    Measured(Range),
    /// The sensor is still listening for the echo of an earlier ping
    Busy,
}

/// One sensor and its LED display, along with the last reading
pub struct Ranger<Trig, Echo, Led> {
    sonar: Sonar<Trig, Echo>,
    leds: LedBank<Led>,
    mode: Mode,
    distance: Option<Range>,
}

impl<Trig, Echo, Led, E> Ranger<Trig, Echo, Led>
where
    Trig: OutputPin<Error = E>,
    Echo: InputPin<Error = E>,
    Led: OutputPin<Error = E>,
{
    pub fn new(sonar: Sonar<Trig, Echo>, leds: LedBank<Led>, mode: Mode) -> Self {
        Ranger {
            sonar,
            leds,
            mode,
            distance: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Last reading, `None` before the first one or after a failed one
    pub fn distance(&self) -> Option<Range> {
        self.distance
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::Blocking => Mode::Bounded(self.sonar.settings().max_range),
            Mode::Bounded(_) => Mode::Blocking,
        };
        self.mode
    }

    /// Take a reading and show it on the LEDs. In bounded mode this returns
    /// `Poll::Busy` instead of blocking while the sensor isn't ready.
    pub fn poll<D, T>(&mut self, delay: &mut D, ticks: &mut T) -> Result<Poll, Error<E>>
    where
        D: DelayUs<u32>,
        T: Ticks,
    {
        let max_range = match self.mode {
            Mode::Blocking => None,
            Mode::Bounded(max_range) => {
                if !self.sonar.is_ready()? {
                    return Ok(Poll::Busy);
                }
                Some(max_range)
            }
        };

        let range = match self.sonar.measure_range(delay, ticks, max_range) {
            Ok(range) => range,
            Err(e) => {
                self.distance = None;
                self.leds.off()?;
                return Err(e);
            }
        };

        self.distance = Some(range);
        self.leds.show(Level::from(range))?;
        Ok(Poll::Measured(range))
    }
}
