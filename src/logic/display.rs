use crate::peripherals::sonar::Range;

/// How many of the four LEDs are lit
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, defmt::Format)]
#[repr(u8)]
pub enum Level {
    Off = 0,
    One = 1,
    Two = 2,
    Three = 3,
    All = 4,
}

impl Level {
    /// LED pattern with LED 1 in bit 0, LEDs fill up from there
    pub fn pattern(self) -> u8 {
        match self {
            Level::Off => 0b0000,
            Level::One => 0b0001,
            Level::Two => 0b0011,
            Level::Three => 0b0111,
            Level::All => 0b1111,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Level::Off => Level::One,
            Level::One => Level::Two,
            Level::Two => Level::Three,
            Level::Three => Level::All,
            Level::All => Level::Off,
        }
    }
}

/// Quantize a distance in cm. The further the target, the more LEDs are lit.
pub fn level_for(distance: u8) -> Level {
    if distance > 20 {
        Level::All
    } else if distance > 10 {
        Level::Three
    } else if distance > 5 {
        Level::Two
    } else if distance > 1 {
        Level::One
    } else {
        Level::Off
    }
}

impl From<Range> for Level {
    fn from(range: Range) -> Self {
        level_for(range.sentinel())
    }
}
