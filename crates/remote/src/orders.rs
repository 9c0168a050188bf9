//! Order actions: list the user's orders, place a new one.
//!
//! Each invocation is `Pending -> Succeeded` (one event emitted) or
//! `Pending -> Failed` (error returned, nothing emitted). The response is
//! translated completely before the event is built, so a failure never
//! leaves a partially applied collection behind.

use std::collections::BTreeMap;

use serde::Deserialize;
use shop_core::timestamp::{format_iso, parse_iso};
use shop_core::OrderRecord;
use time::OffsetDateTime;

use crate::client::ShopClient;
use crate::error::RemoteError;
use crate::event::{EventSink, ShopEvent};
use crate::transport::HttpRequest;

/// One order as the remote store keeps it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredOrder {
    // The store drops empty arrays, so a missing list means no items.
    #[serde(default)]
    cart_items: Vec<serde_json::Value>,
    total_amount: f64,
    date: String,
}

/// Reply to a POST: the generated key.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedKey {
    pub(crate) name: String,
}

impl ShopClient {
    /// Read every order of the configured user and emit
    /// [`ShopEvent::SetOrders`].
    ///
    /// A `null` body (no orders stored yet) yields an empty collection.
    /// Orders are listed in key order; the store's generated keys sort
    /// chronologically.
    pub async fn list_orders(&self, sink: &dyn EventSink) -> Result<(), RemoteError> {
        let response = self
            .call(HttpRequest::get(self.config().orders_url()))
            .await?;

        let stored: Option<BTreeMap<String, StoredOrder>> = response.json()?;
        let orders = stored
            .unwrap_or_default()
            .into_iter()
            .map(|(id, order)| {
                let date = parse_iso(&order.date).map_err(|e| {
                    RemoteError::parse(format!("order '{}' has invalid date '{}': {}", id, order.date, e))
                })?;
                Ok(OrderRecord {
                    id,
                    items: order.cart_items,
                    total_amount: order.total_amount,
                    date,
                })
            })
            .collect::<Result<Vec<_>, RemoteError>>()?;

        tracing::debug!(count = orders.len(), "orders loaded");
        sink.emit(ShopEvent::SetOrders(orders));
        Ok(())
    }

    /// Place an order and emit [`ShopEvent::AddOrder`] with the generated id.
    ///
    /// The item list is not checked here; a total that is NaN or infinite is
    /// rejected before any request, since the store would keep it as `null`.
    /// Not idempotent: retrying after an ambiguous failure may store a
    /// duplicate.
    pub async fn create_order(
        &self,
        items: Vec<serde_json::Value>,
        total_amount: f64,
        sink: &dyn EventSink,
    ) -> Result<(), RemoteError> {
        let total_amount = RemoteError::finite("totalAmount", total_amount)?;
        let date = OffsetDateTime::now_utc();
        let date_text = format_iso(date).map_err(RemoteError::parse)?;
        let body = serde_json::json!({
            "cartItems": items,
            "totalAmount": total_amount,
            "date": date_text,
        });

        let response = self
            .call(HttpRequest::post(self.config().orders_url(), body))
            .await?;
        let created: CreatedKey = response.json()?;

        tracing::info!(order_id = %created.name, total_amount, "order placed");
        sink.emit(ShopEvent::AddOrder(OrderRecord {
            id: created.name,
            items,
            total_amount,
            date,
        }));
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;
    use crate::event::RecordingSink;
    use crate::transport::mock::MockTransport;
    use crate::transport::Method;
    use time::macros::datetime;

    fn client(mock: &MockTransport) -> ShopClient {
        ShopClient::new(Box::new(mock.clone()), RemoteConfig::new("https://store"))
    }

    #[tokio::test]
    async fn list_orders_translates_entries() {
        let mock = MockTransport::new().respond(
            200,
            r#"{"k1":{"cartItems":[],"totalAmount":5,"date":"2023-01-01T00:00:00.000Z"}}"#,
        );
        let sink = RecordingSink::new();
        client(&mock).list_orders(&sink).await.unwrap();

        assert_eq!(
            sink.events(),
            vec![ShopEvent::SetOrders(vec![OrderRecord {
                id: "k1".to_string(),
                items: vec![],
                total_amount: 5.0,
                date: datetime!(2023-01-01 00:00:00 UTC),
            }])]
        );
        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "https://store/orders/u1.json");
    }

    #[tokio::test]
    async fn list_orders_null_body_is_empty() {
        let mock = MockTransport::new().respond(200, "null");
        let sink = RecordingSink::new();
        client(&mock).list_orders(&sink).await.unwrap();
        assert_eq!(sink.events(), vec![ShopEvent::SetOrders(vec![])]);
    }

    #[tokio::test]
    async fn list_orders_missing_cart_items_defaults_empty() {
        let mock = MockTransport::new().respond(
            200,
            r#"{"k1":{"totalAmount":1.5,"date":"2023-06-01T12:30:00.000Z"}}"#,
        );
        let sink = RecordingSink::new();
        client(&mock).list_orders(&sink).await.unwrap();
        match &sink.events()[0] {
            ShopEvent::SetOrders(orders) => assert!(orders[0].items.is_empty()),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_orders_bad_date_emits_nothing() {
        let mock = MockTransport::new().respond(
            200,
            r#"{"k1":{"cartItems":[],"totalAmount":5,"date":"2023-01-01T00:00:00.000Z"},
                "k2":{"cartItems":[],"totalAmount":5,"date":"last tuesday"}}"#,
        );
        let sink = RecordingSink::new();
        let err = client(&mock).list_orders(&sink).await.unwrap_err();
        assert!(matches!(err, RemoteError::Parse { ref message } if message.contains("k2")));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn list_orders_non_success_status() {
        let mock = MockTransport::new().respond(401, r#"{"error":"Permission denied"}"#);
        let sink = RecordingSink::new();
        let err = client(&mock).list_orders(&sink).await.unwrap_err();
        assert_eq!(err, RemoteError::RemoteRequest { status: 401 });
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn create_order_sends_body_and_emits() {
        let mock = MockTransport::new().respond(200, r#"{"name":"o1"}"#);
        let sink = RecordingSink::new();
        let items = vec![serde_json::json!({"id": "p1", "qty": 2})];
        client(&mock)
            .create_order(items.clone(), 19.98, &sink)
            .await
            .unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::Post);
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["cartItems"], serde_json::json!(items));
        assert_eq!(body["totalAmount"], 19.98);
        let sent_date = body["date"].as_str().unwrap();
        assert!(sent_date.ends_with('Z'));

        match &sink.events()[..] {
            [ShopEvent::AddOrder(order)] => {
                assert_eq!(order.id, "o1");
                assert_eq!(order.items, items);
                assert_eq!(format_iso(order.date).unwrap(), sent_date);
            }
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_order_missing_name_is_parse_error() {
        let mock = MockTransport::new().respond(200, r#"{"id":"o1"}"#);
        let sink = RecordingSink::new();
        let err = client(&mock)
            .create_order(vec![], 1.0, &sink)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Parse { .. }));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn create_order_rejects_non_finite_total() {
        for total in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mock = MockTransport::new().respond(200, r#"{"name":"o1"}"#);
            let sink = RecordingSink::new();
            let err = client(&mock)
                .create_order(vec![], total, &sink)
                .await
                .unwrap_err();
            assert!(
                matches!(err, RemoteError::NonFiniteAmount { ref field, .. } if field == "totalAmount")
            );
            assert!(mock.requests().is_empty());
            assert!(sink.is_empty());
        }
    }
}
