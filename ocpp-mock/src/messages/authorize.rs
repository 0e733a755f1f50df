use rust_ocpp::v1_6::messages::authorize::{AuthorizeRequest, AuthorizeResponse};

use super::accepted_id_tag_info;

pub(crate) fn handle(request: Option<AuthorizeRequest>) -> AuthorizeResponse {
    if let Some(request) = request {
        tracing::debug!("Handling: {request:?}");
    }
    AuthorizeResponse {
        id_tag_info: accepted_id_tag_info(),
    }
}
