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
    logic::display::Level as DisplayLevel,
    peripherals::LedBank,
};

// Steps through the display levels to check the LED wiring
#[cortex_m_rt::entry]
fn main() -> ! {
    defmt::println!("Hello, world!");

    let board = hal::pac::Peripherals::take().unwrap();
    let mut timer = Timer::new(board.TIMER0);
    let pins = P0Parts::new(board.P0);
    // LEDs are active low
    let mut leds = LedBank::active_low([
        pins.p0_13.into_push_pull_output(Level::High).degrade(),
        pins.p0_14.into_push_pull_output(Level::High).degrade(),
        pins.p0_15.into_push_pull_output(Level::High).degrade(),
        pins.p0_16.into_push_pull_output(Level::High).degrade(),
    ])
    .unwrap();

    let mut level = DisplayLevel::Off;
    for _ in 0..10 {
        defmt::info!("{}", level);
        leds.show(level).unwrap();
        level = level.next();
        timer.delay_ms(1000u32);
    }
    leds.off().unwrap();

    sonar::exit()
}
