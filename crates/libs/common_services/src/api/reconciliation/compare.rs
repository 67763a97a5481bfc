use crate::database::payment::Payment;
use crate::database::reconciliation_report::{Discrepancy, DiscrepancyKind};
use crate::payment_processor::ProcessorCharge;
use std::collections::BTreeMap;

/// Result of comparing local payments against processor charges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationOutcome {
    pub local_count: usize,
    pub processor_count: usize,
    pub local_total_cents: i64,
    pub processor_total_cents: i64,
    pub matched_count: usize,
    pub discrepancies: Vec<Discrepancy>,
}

/// Pairs records by charge id and reports every charge that does not line up.
///
/// Amounts differing by at most `tolerance_cents` count as equal. A charge with both a
/// wrong amount and a wrong status yields two discrepancies. Output is ordered by
/// charge id.
#[must_use]
pub fn reconcile(
    local: &[Payment],
    remote: &[ProcessorCharge],
    tolerance_cents: i64,
) -> ReconciliationOutcome {
    let local_by_id: BTreeMap<&str, &Payment> = local
        .iter()
        .map(|payment| (payment.processor_charge_id.as_str(), payment))
        .collect();
    let remote_by_id: BTreeMap<&str, &ProcessorCharge> = remote
        .iter()
        .map(|charge| (charge.charge_id.as_str(), charge))
        .collect();

    let mut discrepancies = Vec::new();
    let mut matched_count = 0;

    for (charge_id, payment) in &local_by_id {
        let Some(charge) = remote_by_id.get(charge_id) else {
            discrepancies.push(Discrepancy {
                charge_id: (*charge_id).to_string(),
                kind: DiscrepancyKind::MissingAtProcessor,
                local_amount_cents: Some(payment.amount_cents),
                processor_amount_cents: None,
                local_status: Some(payment.status),
                processor_status: None,
            });
            continue;
        };

        let mut kinds = Vec::new();
        if (payment.amount_cents - charge.amount_cents).abs() > tolerance_cents {
            kinds.push(DiscrepancyKind::AmountMismatch);
        }
        if payment.status != charge.status {
            kinds.push(DiscrepancyKind::StatusMismatch);
        }
        if kinds.is_empty() {
            matched_count += 1;
        }
        discrepancies.extend(kinds.into_iter().map(|kind| Discrepancy {
            charge_id: (*charge_id).to_string(),
            kind,
            local_amount_cents: Some(payment.amount_cents),
            processor_amount_cents: Some(charge.amount_cents),
            local_status: Some(payment.status),
            processor_status: Some(charge.status),
        }));
    }

    discrepancies.extend(
        remote_by_id
            .iter()
            .filter(|(charge_id, _)| !local_by_id.contains_key(*charge_id))
            .map(|(charge_id, charge)| Discrepancy {
                charge_id: (*charge_id).to_string(),
                kind: DiscrepancyKind::MissingLocally,
                local_amount_cents: None,
                processor_amount_cents: Some(charge.amount_cents),
                local_status: None,
                processor_status: Some(charge.status),
            }),
    );
    discrepancies.sort_by(|a, b| a.charge_id.cmp(&b.charge_id));

    ReconciliationOutcome {
        local_count: local.len(),
        processor_count: remote.len(),
        local_total_cents: local.iter().map(|payment| payment.amount_cents).sum(),
        processor_total_cents: remote.iter().map(|charge| charge.amount_cents).sum(),
        matched_count,
        discrepancies,
    }
}
