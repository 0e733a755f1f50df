use rust_ocpp::v1_6::messages::stop_transaction::{StopTransactionRequest, StopTransactionResponse};

use super::accepted_id_tag_info;

pub(crate) fn handle(request: Option<StopTransactionRequest>) -> StopTransactionResponse {
    if let Some(request) = request {
        tracing::debug!("Handling: {request:?}");
    }
    StopTransactionResponse {
        id_tag_info: Some(accepted_id_tag_info()),
    }
}
