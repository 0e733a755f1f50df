use rust_ocpp::v1_6::{messages::clear_cache::ClearCacheResponse, types::ClearCacheStatus};

pub(crate) fn handle() -> ClearCacheResponse {
    ClearCacheResponse {
        status: ClearCacheStatus::Accepted,
    }
}
