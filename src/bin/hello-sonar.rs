#![no_main]
#![no_std]

use embedded_hal::blocking::delay::DelayMs;
use nrf52840_hal::{
    self as hal,
    gpio::{p0::Parts as P0Parts, Level},
    Timer,
};

use sonar::{
    self as _, // global logger + panicking-behavior + memory layout
    logic::{formatting::format_range, settings::Settings, ticks::BusyWait},
    peripherals::Sonar,
};

// Bounded ranging without blocking: only ping when the sensor is ready and
// count how often it wasn't
#[cortex_m_rt::entry]
fn main() -> ! {
    defmt::println!("Hello, sonar!");

    let board = hal::pac::Peripherals::take().unwrap();
    let core_peripherals = hal::pac::CorePeripherals::take().unwrap();
    let pins = P0Parts::new(board.P0);
    let settings = Settings::DEFAULT;

    let mut delay = hal::Delay::new(core_peripherals.SYST);
    let mut ticks = BusyWait::new(Timer::new(board.TIMER1));
    let mut timer = Timer::new(board.TIMER0);

    let trig = pins.p0_03.into_push_pull_output(Level::Low).degrade();
    let echo = pins.p0_04.into_floating_input().degrade();
    let mut sonar = Sonar::new(trig, echo, settings).unwrap();

    let mut busy: u32 = 0;
    loop {
        if sonar.is_ready().unwrap() {
            match sonar.measure_range(&mut delay, &mut ticks, Some(settings.max_range)) {
                Ok(range) => {
                    defmt::info!(
                        "{=str} (busy {=u32} times)",
                        format_range(range).as_str(),
                        busy
                    );
                    busy = 0;
                }
                Err(e) => defmt::warn!("no reading: {}", e),
            }
        } else {
            busy += 1;
        }

        // Stand-in for other work
        timer.delay_ms(10u32);
    }
}
