use rust_ocpp::v1_6::{
    messages::data_transfer::{DataTransferRequest, DataTransferResponse},
    types::DataTransferStatus,
};

pub(crate) fn handle(request: Option<DataTransferRequest>) -> DataTransferResponse {
    if let Some(request) = request {
        tracing::debug!("Handling: {request:?}");
    }
    DataTransferResponse {
        status: DataTransferStatus::Accepted,
        data: None,
    }
}
