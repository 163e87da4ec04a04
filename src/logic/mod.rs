pub mod display;
pub mod formatting;
pub mod ranger;
pub mod settings;
pub mod ticks;

#[cfg(test)]
pub mod sim;
