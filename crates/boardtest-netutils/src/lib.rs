//! Network helpers for the access point side of the board firmware.
//!
//! Everything in here is pure packet/text processing so it can be exercised on
//! the host. The firmware wires these codecs to `embassy-net` sockets.

#![no_std]

pub mod captive;
pub mod dhcp;
pub mod form;
pub mod request;
