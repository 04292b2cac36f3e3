//! Hardware independent part of the board test firmware.
//!
//! The firmware crate provides the ESP32 implementations of the ports declared
//! in [`domain::ports`]; everything else lives here so it runs on the host too.

#![no_std]

pub mod app;
pub mod domain;
pub mod portal;
pub mod protocol;
pub mod storage;
