use rust_ocpp::v1_6::messages::get_configuration::GetConfigurationResponse;
use serde::Deserialize;
use serde_json::Value;

use crate::configuration::{ConfigurationEntry, ConfigurationTable};

/// GetConfiguration payload. `key` must be a list when present; elements that
/// are not strings are reported back as unknown keys in their JSON text.
#[derive(Debug, Deserialize)]
pub(crate) struct GetConfigurationRequest {
    pub(crate) key: Option<Vec<Value>>,
}

/// Reports the requested keys in request order, or every key in table order
/// when the request names none.
pub(crate) fn handle(
    request: GetConfigurationRequest,
    configuration: &ConfigurationTable,
) -> GetConfigurationResponse {
    let requested = request.key.unwrap_or_default();

    let (configuration_key, unknown_key) = if requested.is_empty() {
        let known = configuration
            .iter()
            .map(ConfigurationEntry::to_key_value)
            .collect();
        (known, Vec::new())
    } else {
        let mut known = Vec::new();
        let mut unknown = Vec::new();
        for key in requested {
            match key {
                Value::String(key) => match configuration.get(&key) {
                    Some(entry) => known.push(entry.to_key_value()),
                    None => unknown.push(key),
                },
                other => unknown.push(other.to_string()),
            }
        }
        (known, unknown)
    };

    GetConfigurationResponse {
        configuration_key: Some(configuration_key),
        unknown_key: Some(unknown_key),
    }
}
