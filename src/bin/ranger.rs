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
    logic::{
        formatting::format_range,
        ranger::{Mode, Poll, Ranger},
        settings::Settings,
        ticks::Periodic,
    },
    peripherals::{Button, LedBank, Sonar},
};

#[cortex_m_rt::entry]
fn main() -> ! {
    defmt::println!("Hello, sonar!");

    let board = hal::pac::Peripherals::take().unwrap();
    let core_peripherals = hal::pac::CorePeripherals::take().unwrap();
    let pins = P0Parts::new(board.P0);
    let settings = Settings::DEFAULT;

    let mut delay = hal::Delay::new(core_peripherals.SYST);
    let mut ticks = Periodic(Timer::periodic(board.TIMER0));

    // HC-SR04 on the Arduino header, ECHO comes in through a 5V -> 3.3V divider
    let trig = pins.p0_03.into_push_pull_output(Level::Low).degrade();
    let echo = pins.p0_04.into_floating_input().degrade();
    let sonar = Sonar::new(trig, echo, settings).unwrap();

    // LEDs are active low
    let leds = LedBank::active_low([
        pins.p0_13.into_push_pull_output(Level::High).degrade(),
        pins.p0_14.into_push_pull_output(Level::High).degrade(),
        pins.p0_15.into_push_pull_output(Level::High).degrade(),
        pins.p0_16.into_push_pull_output(Level::High).degrade(),
    ])
    .unwrap();

    let reset_button = Button::new(pins.p0_11.into_pullup_input().degrade());
    let mut mode_button = Button::new(pins.p0_12.into_pullup_input().degrade());

    let mut ranger = Ranger::new(sonar, leds, Mode::Blocking);
    defmt::info!("{}, {}", ranger.mode(), settings);

    loop {
        match ranger.poll(&mut delay, &mut ticks) {
            Ok(Poll::Measured(range)) => {
                defmt::info!("{=str}", format_range(range).as_str());
            }
            Ok(Poll::Busy) => {}
            Err(e) => defmt::warn!("no reading: {}", e),
        }

        // ~10 pings per second
        delay.delay_ms(settings.ping_interval_ms);

        if mode_button.check_release().unwrap() {
            let mode = ranger.toggle_mode();
            defmt::info!("switched to {}", mode);
        }

        // SW1 restarts the board
        if reset_button.is_pressed().unwrap() {
            defmt::println!("Restarting");
            cortex_m::peripheral::SCB::sys_reset();
        }
    }
}
