use crate::api::payments::error::PaymentError;
use crate::api::payments::interfaces::{PaymentListParams, RecordPaymentRequest};
use crate::database::DbError;
use crate::database::job_store::JobStore;
use crate::database::payment::Payment;
use crate::database::payment_store::PaymentStore;
use crate::database::user_store::UserStore;
use common_types::PaymentStatus;
use sqlx::PgPool;
use tracing::{info, instrument};

fn validate_payment(request: &RecordPaymentRequest) -> Result<(), PaymentError> {
    if request.processor_charge_id.trim().is_empty() {
        return Err(PaymentError::BadRequest(
            "processorChargeId must not be empty".to_string(),
        ));
    }
    if request.amount_cents < 0 {
        return Err(PaymentError::BadRequest(
            "amountCents must not be negative".to_string(),
        ));
    }
    if request.status == PaymentStatus::Unpaid {
        return Err(PaymentError::BadRequest(
            "a recorded charge cannot be unpaid".to_string(),
        ));
    }
    Ok(())
}

/// Records a customer charge, and mirrors its status onto the linked job.
#[instrument(skip(pool))]
pub async fn record_payment(
    pool: &PgPool,
    request: &RecordPaymentRequest,
) -> Result<Payment, PaymentError> {
    validate_payment(request)?;
    UserStore::find_by_id(pool, request.customer_id)
        .await?
        .ok_or_else(|| PaymentError::NotFound(format!("customer {}", request.customer_id)))?;

    let mut tx = pool.begin().await?;
    if let Some(job_id) = request.job_id {
        let job = JobStore::find_by_id(&mut *tx, job_id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(format!("job {job_id}")))?;
        if job.customer_id != request.customer_id {
            return Err(PaymentError::BadRequest(format!(
                "job {job_id} does not belong to customer {}",
                request.customer_id
            )));
        }
    }

    let payment = match PaymentStore::create(
        &mut *tx,
        request.customer_id,
        request.job_id,
        request.processor_charge_id.trim(),
        request.amount_cents,
        request.status,
        request.created_at,
    )
    .await
    {
        Ok(payment) => payment,
        Err(DbError::UniqueViolation(_)) => {
            return Err(PaymentError::DuplicateCharge(
                request.processor_charge_id.clone(),
            ));
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(job_id) = payment.job_id {
        JobStore::set_payment_status(&mut *tx, job_id, payment.status).await?;
    }
    tx.commit().await?;

    info!(payment_id = payment.id, charge = %payment.processor_charge_id, "Payment recorded");
    Ok(payment)
}

pub async fn list_payments(
    pool: &PgPool,
    params: &PaymentListParams,
) -> Result<Vec<Payment>, PaymentError> {
    let limit = params.limit.unwrap_or(100).clamp(1, 500);
    Ok(PaymentStore::list_recent(pool, limit).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecordPaymentRequest {
        RecordPaymentRequest {
            customer_id: 3,
            job_id: Some(10),
            processor_charge_id: "ch_123".to_string(),
            amount_cents: 4_500,
            status: PaymentStatus::Succeeded,
            created_at: None,
        }
    }

    #[test]
    fn validates_payment_fields() {
        assert!(validate_payment(&request()).is_ok());

        let mut blank = request();
        blank.processor_charge_id = " ".to_string();
        let mut negative = request();
        negative.amount_cents = -5;
        let mut unpaid = request();
        unpaid.status = PaymentStatus::Unpaid;

        for bad in [blank, negative, unpaid] {
            assert!(matches!(
                validate_payment(&bad),
                Err(PaymentError::BadRequest(_))
            ));
        }
    }
}
