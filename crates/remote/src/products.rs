//! Product actions: list, create, update.
//!
//! Same shape as the order actions: one request, full translation of the
//! reply, then one event.

use std::collections::BTreeMap;

use serde::Deserialize;
use shop_core::{Product, ProductDraft};

use crate::client::ShopClient;
use crate::error::RemoteError;
use crate::event::{EventSink, ShopEvent};
use crate::orders::CreatedKey;
use crate::transport::HttpRequest;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProduct {
    owner_id: String,
    title: String,
    image_url: String,
    description: String,
    price: f64,
}

impl ShopClient {
    /// Read the full product catalogue and emit [`ShopEvent::SetProducts`].
    pub async fn list_products(&self, sink: &dyn EventSink) -> Result<(), RemoteError> {
        let response = self
            .call(HttpRequest::get(self.config().products_url()))
            .await?;

        let stored: Option<BTreeMap<String, StoredProduct>> = response.json()?;
        let products: Vec<Product> = stored
            .unwrap_or_default()
            .into_iter()
            .map(|(id, p)| Product {
                id,
                owner_id: p.owner_id,
                title: p.title,
                image_url: p.image_url,
                description: p.description,
                price: p.price,
            })
            .collect();

        tracing::debug!(count = products.len(), "products loaded");
        sink.emit(ShopEvent::SetProducts(products));
        Ok(())
    }

    /// Store a new product owned by the configured user and emit
    /// [`ShopEvent::CreateProduct`].
    ///
    /// The draft must carry a finite price; that is checked before any
    /// request.
    pub async fn create_product(
        &self,
        draft: &ProductDraft,
        sink: &dyn EventSink,
    ) -> Result<(), RemoteError> {
        let price = draft.price.ok_or_else(|| RemoteError::MissingField {
            field: "price".to_string(),
        })?;
        let price = RemoteError::finite("price", price)?;
        let owner_id = self.config().user_id.clone();
        let body = serde_json::json!({
            "title": draft.title,
            "description": draft.description,
            "imageUrl": draft.image_url,
            "price": price,
            "ownerId": owner_id,
        });

        let response = self
            .call(HttpRequest::post(self.config().products_url(), body))
            .await?;
        let created: CreatedKey = response.json()?;

        tracing::info!(product_id = %created.name, "product created");
        sink.emit(ShopEvent::CreateProduct(Product {
            id: created.name,
            owner_id,
            title: draft.title.clone(),
            image_url: draft.image_url.clone(),
            description: draft.description.clone(),
            price,
        }));
        Ok(())
    }

    /// Patch title, description and image of an existing product and emit
    /// [`ShopEvent::UpdateProduct`]. The price is never sent.
    pub async fn update_product(
        &self,
        product_id: &str,
        draft: &ProductDraft,
        sink: &dyn EventSink,
    ) -> Result<(), RemoteError> {
        let body = serde_json::json!({
            "title": draft.title,
            "description": draft.description,
            "imageUrl": draft.image_url,
        });

        self.call(HttpRequest::patch(self.config().product_url(product_id), body))
            .await?;

        tracing::info!(product_id, "product updated");
        sink.emit(ShopEvent::UpdateProduct {
            id: product_id.to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
        });
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

    fn client(mock: &MockTransport) -> ShopClient {
        ShopClient::new(
            Box::new(mock.clone()),
            RemoteConfig::new("https://store").with_user("u9"),
        )
    }

    fn draft(price: Option<f64>) -> ProductDraft {
        ProductDraft {
            title: "Shoe".to_string(),
            image_url: "https://img/shoe.png".to_string(),
            description: "A comfortable shoe".to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn list_products_translates_entries() {
        let mock = MockTransport::new().respond(
            200,
            r#"{"p1":{"ownerId":"u1","title":"Shoe","imageUrl":"i","description":"d","price":9.99}}"#,
        );
        let sink = RecordingSink::new();
        client(&mock).list_products(&sink).await.unwrap();

        match &sink.events()[..] {
            [ShopEvent::SetProducts(products)] => {
                assert_eq!(products.len(), 1);
                assert_eq!(products[0].id, "p1");
                assert_eq!(products[0].owner_id, "u1");
                assert_eq!(products[0].price, 9.99);
            }
            other => panic!("unexpected events {:?}", other),
        }
        assert_eq!(mock.requests()[0].url, "https://store/products.json");
    }

    #[tokio::test]
    async fn create_product_posts_owner_and_emits() {
        let mock = MockTransport::new().respond(200, r#"{"name":"p2"}"#);
        let sink = RecordingSink::new();
        client(&mock)
            .create_product(&draft(Some(9.99)), &sink)
            .await
            .unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_ref().unwrap()["ownerId"], "u9");
        assert_eq!(request.body.as_ref().unwrap()["imageUrl"], "https://img/shoe.png");

        match &sink.events()[..] {
            [ShopEvent::CreateProduct(product)] => {
                assert_eq!(product.id, "p2");
                assert_eq!(product.owner_id, "u9");
                assert_eq!(product.price, 9.99);
            }
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_product_without_price_sends_nothing() {
        let mock = MockTransport::new();
        let sink = RecordingSink::new();
        let err = client(&mock)
            .create_product(&draft(None), &sink)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RemoteError::MissingField {
                field: "price".to_string()
            }
        );
        assert!(mock.requests().is_empty());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn create_product_infinite_price_sends_nothing() {
        let mock = MockTransport::new().respond(200, r#"{"name":"p2"}"#);
        let sink = RecordingSink::new();
        let err = client(&mock)
            .create_product(&draft(Some(f64::INFINITY)), &sink)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::NonFiniteAmount { ref field, .. } if field == "price"));
        assert!(mock.requests().is_empty());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn update_product_patches_without_price() {
        let mock = MockTransport::new().respond(200, r#"{"title":"Shoe"}"#);
        let sink = RecordingSink::new();
        client(&mock)
            .update_product("p1", &draft(None), &sink)
            .await
            .unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.url, "https://store/products/p1.json");
        assert!(request.body.as_ref().unwrap().get("price").is_none());
        assert_eq!(
            sink.events(),
            vec![ShopEvent::UpdateProduct {
                id: "p1".to_string(),
                title: "Shoe".to_string(),
                description: "A comfortable shoe".to_string(),
                image_url: "https://img/shoe.png".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn update_product_failure_emits_nothing() {
        let mock = MockTransport::new().respond(500, "");
        let sink = RecordingSink::new();
        let err = client(&mock)
            .update_product("p1", &draft(None), &sink)
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::RemoteRequest { status: 500 });
        assert!(sink.is_empty());
    }
}
