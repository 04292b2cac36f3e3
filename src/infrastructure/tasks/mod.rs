mod captive_dns;
mod dhcp_server;
mod http_server;
mod persistence;
mod provisioning;

pub use captive_dns::captive_dns_task;
pub use dhcp_server::dhcp_server_task;
pub use http_server::http_server_task;
pub use persistence::persistence_task;
pub use provisioning::provisioning_task;
