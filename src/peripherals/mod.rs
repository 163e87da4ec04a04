pub mod button;
pub mod led;
pub mod sonar;

pub use button::*;
pub use led::*;
pub use sonar::*;
