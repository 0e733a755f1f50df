use rust_ocpp::v1_6::messages::status_notification::{
    StatusNotificationRequest, StatusNotificationResponse,
};

pub(crate) fn handle(request: Option<StatusNotificationRequest>) -> StatusNotificationResponse {
    if let Some(request) = request {
        tracing::debug!("Handling: {request:?}");
    }
    StatusNotificationResponse {}
}
