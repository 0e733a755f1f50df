use chrono::Utc;
use rust_ocpp::v1_6::messages::heart_beat::HeartbeatResponse;

pub(crate) fn handle() -> HeartbeatResponse {
    let current_time = Utc::now();
    HeartbeatResponse { current_time }
}
