//! Notification read-state: optimistic toggle with compensating rollback.

use roadwatch_api_models::Notification;

use crate::service::NotificationsService;
use crate::SyncError;

impl NotificationsService {
    /// Toggles a notification's read flag.
    ///
    /// The flag flips locally *before* the request leaves, so the unread
    /// badge reacts instantly. If the server rejects the toggle, the
    /// captured prior record is restored; if it confirms, the server's
    /// returned record replaces the optimistic one.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Api`] when the backend declines; the local
    /// toggle has been rolled back by then.
    pub async fn mark_read(&self, id: &str, read: bool) -> Result<Notification, SyncError> {
        let token = {
            let mut store = self.lock();
            let optimistic = store.data().and_then(|list| {
                list.items
                    .iter()
                    .find(|item| item.id == id)
                    .map(|item| Notification {
                        read,
                        ..item.clone()
                    })
            });
            optimistic.and_then(|record| store.optimistic_patch(record))
        };

        match self.client().mark_notification_read(id, read).await {
            Ok(updated) => {
                self.lock().patch_record(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                if let Some(token) = token {
                    log::warn!("[notifications] read toggle for {id} rejected, rolling back");
                    self.lock().rollback(token);
                }
                Err(SyncError::Api(e))
            }
        }
    }

    /// Number of cached unread notifications — the badge count.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.lock()
            .data()
            .map_or(0, |list| list.items.iter().filter(|n| !n.read).count())
    }
}

#[cfg(test)]
mod tests {
    use crate::service::ResourceService;
    use crate::test_support::{list_body, mutation_body, notification_json, FakeTransport};

    use super::*;

    #[tokio::test]
    async fn mark_read_applies_optimistically_and_reconciles() {
        let transport = FakeTransport::new();
        transport.push_ok(list_body(
            "notifications",
            vec![notification_json("ntf_01", false)],
            1,
            1,
            20,
        ));
        transport.push_ok(mutation_body(notification_json("ntf_01", true), "Updated"));
        let service: NotificationsService = ResourceService::new(transport.client(20));
        service.fetch().await.unwrap();
        assert_eq!(service.unread_count(), 1);

        let updated = service.mark_read("ntf_01", true).await.unwrap();
        assert!(updated.read);
        assert_eq!(service.unread_count(), 0);
    }

    #[tokio::test]
    async fn rejected_toggle_rolls_back() {
        let transport = FakeTransport::new();
        transport.push_ok(list_body(
            "notifications",
            vec![notification_json("ntf_01", false)],
            1,
            1,
            20,
        ));
        transport.push_status(500, serde_json::json!({"message": "Storage error"}));
        let service: NotificationsService = ResourceService::new(transport.client(20));
        service.fetch().await.unwrap();

        let err = service.mark_read("ntf_01", true).await.unwrap_err();
        assert_eq!(err.user_message(), "Storage error");
        // The optimistic flip was undone.
        assert_eq!(service.unread_count(), 1);
    }
}
