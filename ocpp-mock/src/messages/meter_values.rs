use rust_ocpp::v1_6::messages::meter_values::{MeterValuesRequest, MeterValuesResponse};

pub(crate) fn handle(request: Option<MeterValuesRequest>) -> MeterValuesResponse {
    if let Some(request) = request {
        tracing::debug!("Handling: {request:?}");
    }
    MeterValuesResponse {}
}
