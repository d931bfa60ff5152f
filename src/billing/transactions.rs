//! Writing match outcomes onto billing transactions.

use crate::models::{MatchOutcome, Transaction};

/// Applies a match outcome to an invoice licence's transactions.
///
/// With per-element results, each transaction is linked to its result by
/// charge element id:
/// - `calculated_volume` is the matched quantity
/// - `volume` is the matched quantity, or `None` when the element or the
///   outcome carries a status
/// - `two_part_tariff_status` is the element's status, falling back to the
///   outcome's
///
/// Transactions without a result are left untouched.
///
/// A blocked outcome has no results, so every transaction is set to null
/// volume with the blocking status.
pub fn apply_match_outcome(outcome: &MatchOutcome, transactions: &mut [Transaction]) {
    let Some(results) = outcome.data.as_ref() else {
        for transaction in transactions.iter_mut() {
            transaction.volume = None;
            transaction.two_part_tariff_status = outcome.error;
            transaction.two_part_tariff_error = true;
        }
        return;
    };

    for transaction in transactions.iter_mut() {
        let Some(result) = results
            .iter()
            .find(|r| r.charge_element_id == transaction.charge_element_id)
        else {
            continue;
        };

        let status = result.error.or(outcome.error);

        transaction.calculated_volume = result.actual_return_quantity;
        transaction.volume = if status.is_some() {
            None
        } else {
            result.actual_return_quantity
        };
        transaction.two_part_tariff_status = status;
        transaction.two_part_tariff_error = status.is_some();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchResult, StatusCode};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn result(element_id: Uuid, actual: Option<&str>, error: Option<StatusCode>) -> MatchResult {
        MatchResult {
            charge_element_id: element_id,
            pro_rata_authorised_quantity: dec("50.000"),
            actual_return_quantity: actual.map(dec),
            error,
        }
    }

    #[test]
    fn test_clean_result_sets_volume() {
        let element_id = Uuid::new_v4();
        let outcome = MatchOutcome {
            error: None,
            data: Some(vec![result(element_id, Some("12.000"), None)]),
        };
        let mut transactions = vec![Transaction::new(element_id)];

        apply_match_outcome(&outcome, &mut transactions);

        assert_eq!(transactions[0].volume, Some(dec("12.000")));
        assert_eq!(transactions[0].calculated_volume, Some(dec("12.000")));
        assert_eq!(transactions[0].two_part_tariff_status, None);
        assert!(!transactions[0].two_part_tariff_error);
    }

    #[test]
    fn test_element_error_nulls_volume_but_keeps_calculation() {
        let element_id = Uuid::new_v4();
        let outcome = MatchOutcome {
            error: Some(StatusCode::OverAbstraction),
            data: Some(vec![result(
                element_id,
                Some("125.000"),
                Some(StatusCode::OverAbstraction),
            )]),
        };
        let mut transactions = vec![Transaction::new(element_id)];

        apply_match_outcome(&outcome, &mut transactions);

        assert_eq!(transactions[0].volume, None);
        assert_eq!(transactions[0].calculated_volume, Some(dec("125.000")));
        assert_eq!(
            transactions[0].two_part_tariff_status,
            Some(StatusCode::OverAbstraction)
        );
        assert!(transactions[0].two_part_tariff_error);
    }

    #[test]
    fn test_overall_error_applies_to_clean_elements() {
        let (flagged_id, clean_id) = (Uuid::new_v4(), Uuid::new_v4());
        let outcome = MatchOutcome {
            error: Some(StatusCode::OverAbstraction),
            data: Some(vec![
                result(flagged_id, Some("125.000"), Some(StatusCode::OverAbstraction)),
                result(clean_id, Some("50.000"), None),
            ]),
        };
        let mut transactions = vec![Transaction::new(flagged_id), Transaction::new(clean_id)];

        apply_match_outcome(&outcome, &mut transactions);

        assert_eq!(transactions[1].volume, None);
        assert_eq!(transactions[1].calculated_volume, Some(dec("50.000")));
        assert_eq!(
            transactions[1].two_part_tariff_status,
            Some(StatusCode::OverAbstraction)
        );
        assert!(transactions[1].two_part_tariff_error);
    }

    #[test]
    fn test_null_billing_results() {
        let element_id = Uuid::new_v4();
        let outcome = MatchOutcome {
            error: Some(StatusCode::LateReturns),
            data: Some(vec![result(element_id, None, Some(StatusCode::LateReturns))]),
        };
        let mut transactions = vec![Transaction::new(element_id)];

        apply_match_outcome(&outcome, &mut transactions);

        assert_eq!(transactions[0].volume, None);
        assert_eq!(transactions[0].calculated_volume, None);
        assert_eq!(
            transactions[0].two_part_tariff_status,
            Some(StatusCode::LateReturns)
        );
        assert!(transactions[0].two_part_tariff_error);
    }

    #[test]
    fn test_blocked_outcome_flags_every_transaction() {
        let outcome = MatchOutcome::blocked(StatusCode::UnderQuery);
        let mut transactions = vec![
            Transaction::new(Uuid::new_v4()),
            Transaction::new(Uuid::new_v4()),
        ];
        transactions[0].volume = Some(dec("3"));

        apply_match_outcome(&outcome, &mut transactions);

        for transaction in &transactions {
            assert_eq!(transaction.volume, None);
            assert_eq!(transaction.two_part_tariff_status, Some(StatusCode::UnderQuery));
            assert!(transaction.two_part_tariff_error);
        }
    }

    #[test]
    fn test_transaction_without_result_untouched() {
        let outcome = MatchOutcome {
            error: Some(StatusCode::OverAbstraction),
            data: Some(vec![result(Uuid::new_v4(), Some("1.000"), None)]),
        };
        let mut transactions = vec![Transaction::new(Uuid::new_v4())];
        let before = transactions.clone();

        apply_match_outcome(&outcome, &mut transactions);

        assert_eq!(transactions, before);
    }
}
