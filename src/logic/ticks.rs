use embedded_hal::{blocking::delay::DelayUs, timer::CountDown};

/// Source of the fixed-length intervals the ranging loop counts. One tick is
/// the round trip time of one distance unit, so the tick count *is* the range.
pub trait Ticks {
    /// Prepare for a run of ticks `tick_us` microseconds long. Called once per
    /// measurement, right when ECHO goes high.
    fn begin(&mut self, tick_us: u32);

    /// Block until the next tick has elapsed.
    fn wait_tick(&mut self);
}

/// Ticks made of plain busy-wait delays. Whatever the loop does between
/// delays (reading ECHO, counting) adds up as drift, which at 58 us per tick
/// is small enough to ignore.
pub struct BusyWait<D> {
    delay: D,
    tick_us: u32,
}

impl<D> BusyWait<D>
where
    D: DelayUs<u32>,
{
    pub fn new(delay: D) -> Self {
        BusyWait { delay, tick_us: 0 }
    }
}

impl<D> Ticks for BusyWait<D>
where
    D: DelayUs<u32>,
{
    fn begin(&mut self, tick_us: u32) {
        self.tick_us = tick_us;
    }

    fn wait_tick(&mut self) {
        self.delay.delay_us(self.tick_us);
    }
}

/// Ticks driven by a periodic hardware timer. The timer reloads on its own,
/// so time spent outside of `wait_tick()` doesn't stretch the ticks as long as
/// it stays below one period.
pub struct Periodic<T>(pub T);

impl<T> Ticks for Periodic<T>
where
    T: CountDown,
    u32: Into<T::Time>,
{
    fn begin(&mut self, tick_us: u32) {
        // nrf timers count at 1 MHz, so the period in ticks of the timer is
        // the period in microseconds
        self.0.start(tick_us);
    }

    fn wait_tick(&mut self) {
        if let Err(never) = nb::block!(self.0.wait()) {
            match never {}
        }
    }
}
