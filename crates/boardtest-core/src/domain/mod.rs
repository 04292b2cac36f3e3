pub mod charset;
pub mod dto;
pub mod entity;
pub mod ports;
pub mod provisioning;
pub mod remote;
pub mod settings;
pub mod status;
