use embedded_hal::digital::v2::InputPin;

/// A push button wired to ground, read through a pull-up
pub struct Button<P> {
    pin: P,
    was_pressed: bool,
}

impl<P, E> Button<P>
where
    P: InputPin<Error = E>,
{
    pub fn new(pin: P) -> Self {
        Button {
            pin,
            was_pressed: false,
        }
    }

    pub fn is_pressed(&self) -> Result<bool, E> {
        self.pin.is_low()
    }

    /// Check when button changes state from being pressed to not being pressed
    pub fn check_release(&mut self) -> Result<bool, E> {
        let is_pressed = self.is_pressed()?;
        let released = self.was_pressed && !is_pressed;
        self.was_pressed = is_pressed;
        Ok(released)
    }
}
