//! Infrastructure layer - Port implementations
//!
//! ESP32 implementations of the `boardtest-core` ports and the background
//! tasks that serve the portal.

pub mod drivers;
pub mod services;
pub mod tasks;
