use rust_ocpp::v1_6::{
    messages::change_configuration::ChangeConfigurationResponse, types::ConfigurationStatus,
};
use serde::Deserialize;
use serde_json::Value;

use crate::configuration::ConfigurationTable;

/// ChangeConfiguration payload, read loosely.
///
/// A key that is missing or not a string is never in the table and is
/// answered `NotSupported`. A missing or null value sets the empty string,
/// any other non-string value is stored as its JSON text.
#[derive(Debug, Deserialize)]
pub(crate) struct ChangeConfigurationRequest {
    pub(crate) key: Option<Value>,
    pub(crate) value: Option<Value>,
}

pub(crate) fn handle(
    request: ChangeConfigurationRequest,
    configuration: &mut ConfigurationTable,
) -> ChangeConfigurationResponse {
    let key = match request.key {
        Some(Value::String(key)) => key,
        other => {
            tracing::debug!("Config key {other:?} is not a configuration key");
            return ChangeConfigurationResponse {
                status: ConfigurationStatus::NotSupported,
            };
        }
    };

    let value = match request.value {
        Some(Value::String(value)) => value,
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };

    let status = configuration.change(&key, &value);
    match status {
        ConfigurationStatus::Accepted => tracing::info!("Config '{key}' changed to '{value}'"),
        _ => tracing::debug!("Config '{key}' not changed to '{value}': {status:?}"),
    }

    ChangeConfigurationResponse { status }
}
