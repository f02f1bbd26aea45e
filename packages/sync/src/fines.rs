//! Fine payment operations.

use roadwatch_api_models::{Payment, PaymentInit};

use crate::service::FinesService;
use crate::SyncError;

impl FinesService {
    /// Initiates a payment against a fine.
    ///
    /// The gateway hand-off and settlement are backend concerns; the
    /// client only receives the created [`Payment`]. Settling a payment
    /// changes the fine's status, so the fines page is refetched after
    /// confirmation rather than guessed at locally.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] when the backend declines the
    /// initiation.
    pub async fn pay(&self, init: &PaymentInit) -> Result<Payment, SyncError> {
        let payment = self.client().pay_fine(init).await?;
        log::info!(
            "[fines] payment {} initiated for fine {} via {}",
            payment.id,
            init.fine_id,
            init.method
        );
        self.refetch_after_mutation("payment").await;
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use roadwatch_api_models::PaymentStatus;
    use roadwatch_store::selectors;

    use crate::service::ResourceService;
    use crate::test_support::{fine_json, list_body, mutation_body, payment_json, FakeTransport};

    use super::*;

    #[tokio::test]
    async fn payment_refetches_the_fines_page() {
        let transport = FakeTransport::new();
        transport.push_ok(list_body(
            "fines",
            vec![fine_json("fin_01", "PENDING", 500.0)],
            1,
            1,
            20,
        ));
        transport.push_ok(mutation_body(
            payment_json("pay_01", "PAID"),
            "Payment completed",
        ));
        transport.push_ok(list_body(
            "fines",
            vec![fine_json("fin_01", "PAID", 500.0)],
            1,
            1,
            20,
        ));
        let service: FinesService = ResourceService::new(transport.client(20));
        service.fetch().await.unwrap();

        let init = PaymentInit::new("fin_01", "MOBILE_BANKING").unwrap();
        let payment = service.pay(&init).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);

        let store = service.store();
        let store = store.lock().unwrap();
        assert_eq!(
            selectors::items(&store)[0].status,
            PaymentStatus::Paid,
            "refetch reflects the settled fine"
        );
    }
}
