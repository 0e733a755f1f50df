use rand_core::{OsRng, RngCore};
use rust_ocpp::v1_6::messages::start_transaction::{
    StartTransactionRequest, StartTransactionResponse,
};

use super::accepted_id_tag_info;
use crate::error::{ResponderError, ResponderResult};

/// Inclusive range transaction ids are drawn from.
///
/// Ids are random, so two transactions may share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionIdRange {
    min: i32,
    max: i32,
}

impl Default for TransactionIdRange {
    fn default() -> Self {
        Self {
            min: 10_000,
            max: 99_999,
        }
    }
}

impl TransactionIdRange {
    /// # Errors
    ///
    /// Returns [`ResponderError::InvalidTransactionIdRange`] if `min` is
    /// greater than `max`.
    pub fn new(min: i32, max: i32) -> ResponderResult<Self> {
        if min > max {
            return Err(ResponderError::InvalidTransactionIdRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> i32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    #[must_use]
    pub fn contains(&self, transaction_id: i32) -> bool {
        (self.min..=self.max).contains(&transaction_id)
    }

    pub(crate) fn next_id(&self) -> i32 {
        let span = u64::from(self.max.abs_diff(self.min)) + 1;
        let offset = u64::from(OsRng.next_u32()) % span;
        // offset < span <= 2^32, so it always fits the distance to max.
        u32::try_from(offset).map_or(self.max, |step| self.min.saturating_add_unsigned(step))
    }
}

pub(crate) fn handle(
    request: Option<StartTransactionRequest>,
    transaction_ids: &TransactionIdRange,
) -> StartTransactionResponse {
    if let Some(request) = request {
        tracing::debug!("Handling: {request:?}");
    }
    let transaction_id = transaction_ids.next_id();
    tracing::info!("Starting transaction {transaction_id}");
    StartTransactionResponse {
        id_tag_info: accepted_id_tag_info(),
        transaction_id,
    }
}
