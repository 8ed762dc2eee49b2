pub mod cafe_profile;
pub mod energy_reading;

pub use cafe_profile::CafeProfile;
pub use energy_reading::{EnergyReading, NewEnergyReading};
