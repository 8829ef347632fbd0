//! Sensor drivers

pub mod dht20;
