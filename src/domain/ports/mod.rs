//! Domain ports
//!
//! Interfaces between the domain core and the outside world.
//! External adapters implement these.

pub mod weather;

pub use weather::{WeatherData, WeatherError, WeatherProvider};
