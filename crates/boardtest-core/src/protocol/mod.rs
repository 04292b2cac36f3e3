pub mod dht22;
pub mod nec;
