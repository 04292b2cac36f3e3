use core::sync::atomic::{AtomicU8, Ordering};

use boardtest_core::domain::{
    ports::ProvisioningStateReader,
    provisioning::{ProvisioningEvent, ProvisioningState},
};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver},
};

const PROVISIONING_EVENTS_SIZE: usize = 8;

pub type ProvisioningEventReceiver =
    Receiver<'static, CriticalSectionRawMutex, ProvisioningEvent, PROVISIONING_EVENTS_SIZE>;

static PROVISIONING_STATE: AtomicU8 = AtomicU8::new(0);

static PROVISIONING_EVENTS: Channel<
    CriticalSectionRawMutex,
    ProvisioningEvent,
    PROVISIONING_EVENTS_SIZE,
> = Channel::new();

/// Queue an event for the provisioning task.
///
/// Client activity arrives in bursts, a full queue already carries one.
pub(crate) fn notify_provisioning(event: ProvisioningEvent) {
    if PROVISIONING_EVENTS.try_send(event).is_err() {
        log::debug!("provisioning: event queue full, dropped {:?}", event);
    }
}

pub fn get_provisioning_receiver() -> ProvisioningEventReceiver {
    PROVISIONING_EVENTS.receiver()
}

pub(crate) fn publish_provisioning_state(state: ProvisioningState) {
    PROVISIONING_STATE.store(state.as_u8(), Ordering::Relaxed);
}

/// Read side of the state owned by the provisioning task.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProvisioningService;

impl ProvisioningStateReader for ProvisioningService {
    fn provisioning_state(&self) -> ProvisioningState {
        ProvisioningState::from_u8(PROVISIONING_STATE.load(Ordering::Relaxed))
            .unwrap_or(ProvisioningState::Boot)
    }
}
