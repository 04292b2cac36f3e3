use embassy_net::Stack;

use crate::{
    config::HTTP_PORT,
    controllers::PortalHttpController,
    net::http::HttpServer,
};

const RX_BUFFER_SIZE: usize = 2048;
const TX_BUFFER_SIZE: usize = 4096;

/// Portal server, one instance per network stack.
#[embassy_executor::task(pool_size = 2)]
pub async fn http_server_task(stack: Stack<'static>, handler: &'static PortalHttpController) {
    let server = HttpServer::new(handler);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    log::info!("http_server: listening on port {}", HTTP_PORT);
    server
        .listen_and_serve(stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await
}
