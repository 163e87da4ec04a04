//! A simulated HC-SR04 with pins, delay and timer that share one microsecond
//! clock. Time only moves when something waits on it.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::{
    blocking::delay::DelayUs,
    digital::v2::{InputPin, OutputPin},
    timer::CountDown,
};
use void::Void;

/// Length of `ticks` ranging ticks, in microseconds
pub const fn ticks_us(ticks: u32) -> u32 {
    ticks * 58
}

pub struct Sim {
    now: Cell<u32>,
    trig_high: Cell<bool>,
    trig_rise: Cell<u32>,
    last_trigger_us: Cell<Option<u32>>,
    triggers: Cell<u32>,
    latency_us: Cell<u32>,
    pulse_us: Cell<Option<u32>>,
    // ECHO is high for now in [start; end)
    echo: Cell<(u32, u32)>,
}

impl Sim {
    pub fn new() -> Self {
        Sim {
            now: Cell::new(0),
            trig_high: Cell::new(false),
            trig_rise: Cell::new(0),
            last_trigger_us: Cell::new(None),
            triggers: Cell::new(0),
            latency_us: Cell::new(0),
            pulse_us: Cell::new(None),
            echo: Cell::new((0, 0)),
        }
    }

    /// Sensor that answers every trigger with an ECHO pulse `pulse_us` long
    pub fn with_echo(pulse_us: u32) -> Self {
        let sim = Sim::new();
        sim.set_echo(Some(pulse_us));
        sim
    }

    pub fn now(&self) -> u32 {
        self.now.get()
    }

    pub fn advance(&self, us: u32) {
        self.now.set(self.now.get().saturating_add(us));
    }

    /// `None` makes the sensor ignore triggers
    pub fn set_echo(&self, pulse_us: Option<u32>) {
        self.pulse_us.set(pulse_us);
    }

    /// Delay between the end of TRIG and the rising edge of ECHO
    pub fn set_latency(&self, latency_us: u32) {
        self.latency_us.set(latency_us);
    }

    /// Keep ECHO high for `us` from now, as if an earlier pulse was running
    pub fn hold_echo(&self, us: u32) {
        self.echo.set((self.now(), self.now() + us));
    }

    pub fn echo_high(&self) -> bool {
        let (start, end) = self.echo.get();
        start <= self.now() && self.now() < end
    }

    pub fn triggers(&self) -> u32 {
        self.triggers.get()
    }

    pub fn last_trigger_us(&self) -> Option<u32> {
        self.last_trigger_us.get()
    }

    /// When the last TRIG pulse started
    pub fn last_trigger_at(&self) -> u32 {
        self.trig_rise.get()
    }

    /// End of the current (or last) ECHO pulse
    pub fn echo_end(&self) -> u32 {
        self.echo.get().1
    }

    fn trig(&self, high: bool) {
        let was_high = self.trig_high.replace(high);
        if high && !was_high {
            self.trig_rise.set(self.now());
        } else if !high && was_high {
            self.last_trigger_us.set(Some(self.now() - self.trig_rise.get()));
            self.triggers.set(self.triggers.get() + 1);
            // A real HC-SR04 ignores TRIG while it's listening
            if self.echo_high() {
                return;
            }
            if let Some(pulse_us) = self.pulse_us.get() {
                let start = self.now() + self.latency_us.get();
                self.echo.set((start, start + pulse_us));
            }
        }
    }
}

pub struct FakeTrig<'a>(pub &'a Sim);

impl OutputPin for FakeTrig<'_> {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.trig(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.trig(true);
        Ok(())
    }
}

pub struct FakeEcho<'a>(pub &'a Sim);

impl InputPin for FakeEcho<'_> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.0.echo_high())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.0.echo_high())
    }
}

#[derive(Clone, Copy)]
pub struct FakeDelay<'a>(pub &'a Sim);

impl DelayUs<u32> for FakeDelay<'_> {
    fn delay_us(&mut self, us: u32) {
        self.0.advance(us);
    }
}

pub struct FakeCountDown<'a> {
    sim: &'a Sim,
    period: u32,
    next: u32,
}

impl<'a> FakeCountDown<'a> {
    pub fn new(sim: &'a Sim) -> Self {
        FakeCountDown {
            sim,
            period: 0,
            next: 0,
        }
    }
}

impl CountDown for FakeCountDown<'_> {
    type Time = u32;

    fn start<T>(&mut self, count: T)
    where
        T: Into<Self::Time>,
    {
        self.period = count.into();
        self.next = self.sim.now() + self.period;
    }

    fn wait(&mut self) -> nb::Result<(), Void> {
        if self.sim.now() < self.next {
            self.sim.now.set(self.next);
        }
        self.next += self.period;
        Ok(())
    }
}

/// A plain level holder, stands in for both LEDs and buttons
pub struct FakePin<'a>(pub &'a Cell<bool>);

impl OutputPin for FakePin<'_> {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

impl InputPin for FakePin<'_> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}
