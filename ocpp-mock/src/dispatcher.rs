use serde_json::Value;

use crate::{
    configuration::ConfigurationTable,
    envelope::{Envelope, Payload},
    error::{IntoOcppResponseMessage, OcppError, OcppResult},
    messages::{
        authorize, boot_notification, change_configuration, clear_cache, data_transfer,
        get_configuration, heartbeat, meter_values,
        start_transaction::{self, TransactionIdRange},
        status_notification, stop_transaction, OcppRequestMessage, OcppResponseMessage,
    },
};

/// Maps calls to responses and owns the mutable state they touch.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    configuration: ConfigurationTable,
    transaction_ids: TransactionIdRange,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ConfigurationTable::default(), TransactionIdRange::default())
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new(configuration: ConfigurationTable, transaction_ids: TransactionIdRange) -> Self {
        Self {
            configuration,
            transaction_ids,
        }
    }

    #[must_use]
    pub fn configuration(&self) -> &ConfigurationTable {
        &self.configuration
    }

    /// Answers one call.
    ///
    /// Known actions produce a CallResult and unknown ones a `NotSupported`
    /// CallError, both carrying `unique_id`.
    ///
    /// # Errors
    ///
    /// Returns [`OcppError::UnexpectedInternal`] if a configuration payload
    /// cannot be read or a response cannot be serialized. Nothing should be
    /// sent back in that case.
    pub fn dispatch(
        &mut self,
        action: &str,
        payload: Payload,
        unique_id: &str,
    ) -> OcppResult<Envelope> {
        tracing::debug!(
            "Received '{action}' with payload: {}",
            serde_json::Value::Object(payload.clone())
        );

        let message = OcppRequestMessage::parse(action, payload)?;
        let response = match self.process(message) {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!("{error}");
                error.into_ocpp_response()?
            }
        };

        response.into_envelope(unique_id)
    }

    fn process(&mut self, message: OcppRequestMessage) -> OcppResult<OcppResponseMessage> {
        let response = match message {
            OcppRequestMessage::BootNotification(request) => OcppResponseMessage::BootNotification(
                boot_notification::handle(request, &self.configuration),
            ),
            OcppRequestMessage::Heartbeat => OcppResponseMessage::Heartbeat(heartbeat::handle()),
            OcppRequestMessage::Authorize(request) => {
                OcppResponseMessage::Authorize(authorize::handle(request))
            }
            OcppRequestMessage::StatusNotification(request) => {
                OcppResponseMessage::StatusNotification(status_notification::handle(request))
            }
            OcppRequestMessage::StartTransaction(request) => OcppResponseMessage::StartTransaction(
                start_transaction::handle(request, &self.transaction_ids),
            ),
            OcppRequestMessage::MeterValues(request) => {
                OcppResponseMessage::MeterValues(meter_values::handle(request))
            }
            OcppRequestMessage::StopTransaction(request) => {
                OcppResponseMessage::StopTransaction(stop_transaction::handle(request))
            }
            OcppRequestMessage::DataTransfer(request) => {
                OcppResponseMessage::DataTransfer(data_transfer::handle(request))
            }
            OcppRequestMessage::ClearCache => OcppResponseMessage::ClearCache(clear_cache::handle()),
            OcppRequestMessage::ChangeConfiguration(request) => {
                OcppResponseMessage::ChangeConfiguration(change_configuration::handle(
                    request,
                    &mut self.configuration,
                ))
            }
            OcppRequestMessage::GetConfiguration(request) => OcppResponseMessage::GetConfiguration(
                get_configuration::handle(request, &self.configuration),
            ),
            OcppRequestMessage::Unsupported(action) => {
                return Err(OcppError::UnsupportedAction { action })
            }
        };
        Ok(response)
    }
}
