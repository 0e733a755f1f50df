use chrono::Utc;
use rust_ocpp::v1_6::{
    messages::boot_notification::{BootNotificationRequest, BootNotificationResponse},
    types::RegistrationStatus,
};

use crate::configuration::ConfigurationTable;

/// Accepts every station. The advertised heartbeat interval is read from the
/// `HeartbeatInterval` configuration key, so a ChangeConfiguration is
/// reflected by the next boot.
pub(crate) fn handle(
    request: Option<BootNotificationRequest>,
    configuration: &ConfigurationTable,
) -> BootNotificationResponse {
    if let Some(request) = request {
        tracing::debug!("Handling: {request:?}");
    }

    let current_time = Utc::now();
    let interval = configuration
        .get("HeartbeatInterval")
        .and_then(|entry| entry.value().parse().ok())
        .unwrap_or(60);
    let status = RegistrationStatus::Accepted;
    BootNotificationResponse {
        current_time,
        interval,
        status,
    }
}
