use embedded_hal::digital::v2::OutputPin;

use crate::logic::display::Level;

/// The four user LEDs, LED 1 first
pub struct LedBank<P> {
    leds: [P; 4],
    active_low: bool,
}

impl<P, E> LedBank<P>
where
    P: OutputPin<Error = E>,
{
    /// LEDs that light up when their pin is driven low, like the ones on the
    /// nRF52840-DK
    pub fn active_low(leds: [P; 4]) -> Result<Self, E> {
        Self::new(leds, true)
    }

    pub fn active_high(leds: [P; 4]) -> Result<Self, E> {
        Self::new(leds, false)
    }

    fn new(leds: [P; 4], active_low: bool) -> Result<Self, E> {
        let mut bank = LedBank { leds, active_low };
        bank.off()?;
        Ok(bank)
    }

    /// LED `i` is lit when bit `i` of `pattern` is set
    pub fn set_pattern(&mut self, pattern: u8) -> Result<(), E> {
        for (i, led) in self.leds.iter_mut().enumerate() {
            let lit = pattern & (1 << i) > 0;
            if lit != self.active_low {
                led.set_high()?;
            } else {
                led.set_low()?;
            }
        }
        Ok(())
    }

    pub fn show(&mut self, level: Level) -> Result<(), E> {
        self.set_pattern(level.pattern())
    }

    pub fn off(&mut self) -> Result<(), E> {
        self.set_pattern(0)
    }
}
