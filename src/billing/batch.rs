//! Batch processing of invoice licences.
//!
//! Each invoice licence is loaded, matched and written back independently.
//! Matching keeps all of its state local to one call, so a batch runs its
//! invoice licences concurrently on tokio's blocking pool.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::MatchingConfig;
use crate::error::{EngineError, EngineResult};
use crate::matching::match_returns_to_charge_elements;
use crate::models::{InvoiceLicence, MatchOutcome};

use super::data_source::BillingDataSource;
use super::transactions::apply_match_outcome;

/// An invoice licence after batch processing.
#[derive(Debug)]
pub struct ProcessedInvoiceLicence {
    /// The invoice licence, with its transactions updated when matching succeeded.
    pub invoice_licence: InvoiceLicence,
    /// The match outcome, or why this invoice licence could not be processed.
    pub outcome: EngineResult<MatchOutcome>,
}

/// Loads, matches and applies the outcome for one invoice licence.
///
/// On error the transactions are left as they were.
///
/// # Errors
///
/// Returns the data source's error, or the engine's error for invalid charge
/// elements or returns.
pub fn process_invoice_licence<S: BillingDataSource + ?Sized>(
    source: &S,
    config: &MatchingConfig,
    invoice_licence: &mut InvoiceLicence,
) -> EngineResult<MatchOutcome> {
    let charge_elements = source.charge_elements(invoice_licence)?;
    let returns = source.returns(invoice_licence)?;

    let outcome = match_returns_to_charge_elements(&charge_elements, &returns, config)?;
    apply_match_outcome(&outcome, &mut invoice_licence.transactions);

    debug!(
        invoice_licence_id = %invoice_licence.id,
        licence_ref = %invoice_licence.licence_ref,
        status = ?outcome.error,
        "Invoice licence processed"
    );
    Ok(outcome)
}

/// Processes a batch of invoice licences concurrently.
///
/// Results come back in input order. A failure for one invoice licence is
/// recorded in its [`ProcessedInvoiceLicence::outcome`] and does not stop
/// the rest of the batch.
///
/// # Errors
///
/// Returns `BatchTask` if a worker task panics or is cancelled, since the
/// invoice licence it held is lost.
pub async fn process_batch<S: BillingDataSource + 'static>(
    source: Arc<S>,
    config: Arc<MatchingConfig>,
    invoice_licences: Vec<InvoiceLicence>,
) -> EngineResult<Vec<ProcessedInvoiceLicence>> {
    let correlation_id = Uuid::new_v4();
    let batch_size = invoice_licences.len();
    let start_time = Instant::now();
    info!(
        correlation_id = %correlation_id,
        invoice_licences = batch_size,
        "Processing two-part tariff batch"
    );

    let mut tasks = JoinSet::new();
    for (index, mut invoice_licence) in invoice_licences.into_iter().enumerate() {
        let source = Arc::clone(&source);
        let config = Arc::clone(&config);

        tasks.spawn_blocking(move || {
            let outcome =
                process_invoice_licence(source.as_ref(), config.as_ref(), &mut invoice_licence);
            (
                index,
                ProcessedInvoiceLicence {
                    invoice_licence,
                    outcome,
                },
            )
        });
    }

    let mut slots: Vec<Option<ProcessedInvoiceLicence>> =
        std::iter::repeat_with(|| None).take(batch_size).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, processed) = joined.map_err(|err| EngineError::BatchTask {
            message: err.to_string(),
        })?;

        if let Err(err) = &processed.outcome {
            warn!(
                correlation_id = %correlation_id,
                invoice_licence_id = %processed.invoice_licence.id,
                licence_ref = %processed.invoice_licence.licence_ref,
                error = %err,
                "Invoice licence could not be processed"
            );
        }
        slots[index] = Some(processed);
    }

    let processed: Vec<ProcessedInvoiceLicence> = slots.into_iter().flatten().collect();
    let failed = processed.iter().filter(|p| p.outcome.is_err()).count();

    info!(
        correlation_id = %correlation_id,
        invoice_licences = processed.len(),
        failed,
        duration_ms = start_time.elapsed().as_millis() as u64,
        "Two-part tariff batch complete"
    );
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AbstractionPeriod, ChargeElement, ReturnLine, ReturnPurpose, ReturnRecord, ReturnStatus,
        Season, Source, StatusCode, Transaction,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_element(quantity: &str) -> ChargeElement {
        ChargeElement {
            id: Uuid::new_v4(),
            source: Source::Unsupported,
            season: Season::AllYear,
            purpose_tertiary_code: 400,
            is_two_part_tariff: true,
            start_date: make_date("2025-04-01"),
            end_date: make_date("2026-03-31"),
            abstraction_period: AbstractionPeriod::ALL_YEAR,
            time_limited_period: None,
            authorised_annual_quantity: dec(quantity),
            billable_annual_quantity: None,
            total_days: 365,
            billable_days: 365,
        }
    }

    fn create_return(quantity: &str) -> ReturnRecord {
        ReturnRecord {
            id: "ret_001".to_string(),
            status: ReturnStatus::Completed,
            due_date: make_date("2026-04-28"),
            received_date: Some(make_date("2026-04-10")),
            under_query: false,
            abstraction_period: AbstractionPeriod::ALL_YEAR,
            purposes: vec![ReturnPurpose { tertiary_code: 400 }],
            lines: Some(vec![ReturnLine {
                start_date: make_date("2025-04-01"),
                end_date: make_date("2026-03-31"),
                quantity: Some(dec(quantity)),
            }]),
        }
    }

    /// Serves fixed records per licence reference.
    #[derive(Default)]
    struct InMemorySource {
        elements: HashMap<String, Vec<ChargeElement>>,
        returns: HashMap<String, Vec<ReturnRecord>>,
    }

    impl InMemorySource {
        fn with_licence(
            mut self,
            licence_ref: &str,
            elements: Vec<ChargeElement>,
            returns: Vec<ReturnRecord>,
        ) -> Self {
            self.elements.insert(licence_ref.to_string(), elements);
            self.returns.insert(licence_ref.to_string(), returns);
            self
        }
    }

    impl BillingDataSource for InMemorySource {
        fn charge_elements(
            &self,
            invoice_licence: &InvoiceLicence,
        ) -> EngineResult<Vec<ChargeElement>> {
            self.elements
                .get(&invoice_licence.licence_ref)
                .cloned()
                .ok_or_else(|| EngineError::DataSource {
                    invoice_licence_id: invoice_licence.id,
                    message: format!("no charge version for {}", invoice_licence.licence_ref),
                })
        }

        fn returns(&self, invoice_licence: &InvoiceLicence) -> EngineResult<Vec<ReturnRecord>> {
            Ok(self
                .returns
                .get(&invoice_licence.licence_ref)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn invoice_licence(licence_ref: &str, elements: &[&ChargeElement]) -> InvoiceLicence {
        InvoiceLicence {
            id: Uuid::new_v4(),
            licence_ref: licence_ref.to_string(),
            transactions: elements.iter().map(|e| Transaction::new(e.id)).collect(),
        }
    }

    #[test]
    fn test_process_invoice_licence_applies_outcome() {
        let element = create_element("50");
        let mut licence = invoice_licence("01/123", &[&element]);
        let source = InMemorySource::default().with_licence(
            "01/123",
            vec![element],
            vec![create_return("12000")],
        );

        let outcome =
            process_invoice_licence(&source, &MatchingConfig::default(), &mut licence).unwrap();

        assert_eq!(outcome.error, None);
        assert_eq!(licence.transactions[0].volume, Some(dec("12")));
        assert!(!licence.transactions[0].two_part_tariff_error);
    }

    #[test]
    fn test_data_source_failure_leaves_transactions_alone() {
        let element = create_element("50");
        let mut licence = invoice_licence("02/456", &[&element]);
        let before = licence.clone();

        let result = process_invoice_licence(
            &InMemorySource::default(),
            &MatchingConfig::default(),
            &mut licence,
        );

        assert!(matches!(result, Err(EngineError::DataSource { .. })));
        assert_eq!(licence, before);
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order_and_isolates_failures() {
        let matched = create_element("50");
        let blocked = create_element("20");
        let licences = vec![
            invoice_licence("01/001", &[&matched]),
            invoice_licence("01/002", &[]),
            invoice_licence("01/003", &[&blocked]),
        ];
        let source = InMemorySource::default()
            .with_licence("01/001", vec![matched], vec![create_return("5000")])
            .with_licence("01/003", vec![blocked], vec![]);

        let processed = process_batch(
            Arc::new(source),
            Arc::new(MatchingConfig::default()),
            licences,
        )
        .await
        .unwrap();

        let refs: Vec<&str> = processed
            .iter()
            .map(|p| p.invoice_licence.licence_ref.as_str())
            .collect();
        assert_eq!(refs, vec!["01/001", "01/002", "01/003"]);

        assert_eq!(processed[0].outcome.as_ref().unwrap().error, None);
        assert_eq!(
            processed[0].invoice_licence.transactions[0].volume,
            Some(dec("5"))
        );

        assert!(matches!(
            processed[1].outcome,
            Err(EngineError::DataSource { .. })
        ));

        let blocked_outcome = processed[2].outcome.as_ref().unwrap();
        assert_eq!(blocked_outcome.error, Some(StatusCode::NoReturnsForMatching));
        let transaction = &processed[2].invoice_licence.transactions[0];
        assert_eq!(transaction.volume, None);
        assert!(transaction.two_part_tariff_error);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let processed = process_batch(
            Arc::new(InMemorySource::default()),
            Arc::new(MatchingConfig::default()),
            vec![],
        )
        .await
        .unwrap();

        assert!(processed.is_empty());
    }
}
