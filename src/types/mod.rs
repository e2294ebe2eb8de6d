pub mod country;
pub mod frames;
pub mod state;
pub mod weather_variable;
