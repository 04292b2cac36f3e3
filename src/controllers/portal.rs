use core::net::Ipv4Addr;

use boardtest_core::{
    app::SubmitError,
    domain::{
        dto::StatusSnapshot,
        ports::{ProvisioningStateReader, SettingsReader},
        provisioning::{ProvisioningEvent, ProvisioningState},
    },
    portal::{render_config_page, render_not_found, render_root_page},
};
use boardtest_netutils::captive::{is_device_host, portal_location};
use heapless::String;

use super::CONFIGURATION_USECASES;
use crate::{
    config,
    infrastructure::services::{BoardStateService, notify_provisioning},
    net::http::{HttpConnection, HttpHandler, HttpMethod, HttpResult, ResponseHeaders},
};

const PAGE_BUFFER_SIZE: usize = 4096;

type Page = String<PAGE_BUFFER_SIZE>;

/// Configuration portal served on the access point and station networks.
pub struct PortalHttpController {
    board: BoardStateService,
    /// Set on the access point: requests for other hosts are redirected here
    captive_address: Option<Ipv4Addr>,
}

impl PortalHttpController {
    pub fn access_point(board: BoardStateService) -> Self {
        Self {
            board,
            captive_address: Some(config::AP_ADDRESS),
        }
    }

    pub fn station(board: BoardStateService) -> Self {
        Self {
            board,
            captive_address: None,
        }
    }
}

impl HttpHandler for PortalHttpController {
    async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult {
        let mut conn = conn;

        if matches!(
            self.board.provisioning_state(),
            ProvisioningState::NotConfigured | ProvisioningState::ApMode
        ) {
            notify_provisioning(ProvisioningEvent::ClientActivity);
        }

        if let Some(address) = self.captive_address {
            let thing_name = self.board.read_settings().thing_name;
            if !is_device_host(&conn.host, address, &thing_name) {
                log::debug!("portal: redirecting request for '{}'", conn.host);
                return conn.redirect(&portal_location(address)).await;
            }
        }

        match conn.route() {
            (HttpMethod::Get, "/") => self.handle_root(&mut conn).await,
            (HttpMethod::Get, "/config") => self.handle_get_config(&mut conn).await,
            (HttpMethod::Post, "/config") => handle_post_config(&mut conn).await,
            (HttpMethod::Get, "/api/status") => self.handle_status(&mut conn).await,
            (_, "/" | "/config" | "/api/status") => {
                conn.write_text(ResponseHeaders::method_not_allowed(), "Method Not Allowed")
                    .await
            }
            _ => serve_404(&mut conn).await,
        }
    }
}

impl PortalHttpController {
    async fn handle_root(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let mut page = Page::new();
        render_root_page(&mut page, &self.board.read_settings())?;
        conn.write_html(ResponseHeaders::success(), &page).await
    }

    async fn handle_get_config(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let mut page = Page::new();
        render_config_page(&mut page, &self.board.read_settings(), None, false)?;
        conn.write_html(ResponseHeaders::success().with_no_store(), &page)
            .await
    }

    async fn handle_status(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let snapshot = self.board.snapshot();
        let status = StatusSnapshot {
            temperature: snapshot.climate.temperature,
            humidity: snapshot.climate.humidity,
            light: snapshot.light,
            rgb: [snapshot.color.r, snapshot.color.g, snapshot.color.b],
            state: self.board.provisioning_state().as_u8(),
            uptime_ms: embassy_time::Instant::now().as_millis(),
            build_version: config::BUILD_VERSION,
        };
        conn.write_json(&status).await
    }
}

async fn handle_post_config(conn: &mut HttpConnection<'_>) -> HttpResult {
    if !conn.body_fits() {
        return conn
            .write_text(ResponseHeaders::payload_too_large(), "Payload Too Large")
            .await;
    }

    let result = {
        let body = conn.read_form_body().await?;
        CONFIGURATION_USECASES.lock(|cell| {
            cell.borrow_mut()
                .as_mut()
                .map(|usecases| usecases.submit_form(body))
        })
    };

    let mut page = Page::new();
    match result {
        Some(Ok(saved)) => {
            render_config_page(&mut page, &saved, None, true)?;
            conn.write_html(ResponseHeaders::success().with_no_store(), &page)
                .await
        }
        Some(Err(SubmitError::Invalid(rejected))) => {
            log::info!("portal: configuration rejected");
            render_config_page(&mut page, &rejected.settings, Some(&rejected.errors), false)?;
            conn.write_html(ResponseHeaders::success().with_no_store(), &page)
                .await
        }
        Some(Err(SubmitError::Settings(e))) => {
            log::warn!("portal: failed to store configuration: {:?}", e);
            conn.write_text(ResponseHeaders::unavailable(), "Busy, try again")
                .await
        }
        None => {
            log::error!("portal: configuration use cases not initialized");
            conn.write_text(ResponseHeaders::unavailable(), "Starting up")
                .await
        }
    }
}

async fn serve_404(conn: &mut HttpConnection<'_>) -> HttpResult {
    let mut page = Page::new();
    render_not_found(&mut page, &conn.path)?;
    conn.write_html(ResponseHeaders::not_found(), &page).await
}
