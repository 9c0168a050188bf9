//! Domain records handed to the application-state layer.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::timestamp::format_iso;

/// A placed order.
///
/// Line items are kept as raw JSON so that whatever shape the cart uses
/// survives the round-trip to the remote store unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: String,
    pub items: Vec<serde_json::Value>,
    pub total_amount: f64,
    pub date: OffsetDateTime,
}

impl OrderRecord {
    /// JSON view with the date rendered as an ISO-8601 string.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "items": self.items,
            "totalAmount": self.total_amount,
            "date": format_iso(self.date).unwrap_or_else(|_| self.date.to_string()),
        })
    }
}

/// Typed cart line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub product_title: String,
    pub product_price: f64,
    pub quantity: u32,
    pub sum: f64,
}

impl CartItem {
    /// A line of `quantity` units; `sum` is price times quantity.
    pub fn new(
        product_id: impl Into<String>,
        product_title: impl Into<String>,
        product_price: f64,
        quantity: u32,
    ) -> Self {
        CartItem {
            product_id: product_id.into(),
            product_title: product_title.into(),
            product_price,
            quantity,
            sum: product_price * f64::from(quantity),
        }
    }

    /// The opaque JSON form carried by [`OrderRecord::items`].
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "productId": self.product_id,
            "productTitle": self.product_title,
            "productPrice": self.product_price,
            "quantity": self.quantity,
            "sum": self.sum,
        })
    }
}

/// A product listed in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub price: f64,
}

/// Product fields collected by the edit form.
///
/// `price` is `None` when an existing product is edited: its price is not
/// editable.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn cart_item_sum() {
        let item = CartItem::new("p1", "Shoe", 9.99, 2);
        assert!((item.sum - 19.98).abs() < 1e-9);
        assert_eq!(item.to_value()["productId"], "p1");
        assert_eq!(item.to_value()["quantity"], 2);
    }

    #[test]
    fn order_json_view() {
        let order = OrderRecord {
            id: "o1".to_string(),
            items: vec![serde_json::json!({"id": "p1", "qty": 2})],
            total_amount: 19.98,
            date: datetime!(2023-01-01 00:00:00 UTC),
        };
        let json = order.to_json();
        assert_eq!(json["id"], "o1");
        assert_eq!(json["totalAmount"], 19.98);
        assert_eq!(json["date"], "2023-01-01T00:00:00.000Z");
        assert_eq!(json["items"][0]["qty"], 2);
    }

    #[test]
    fn product_uses_camel_case() {
        let product = Product {
            id: "p1".to_string(),
            owner_id: "u1".to_string(),
            title: "Shoe".to_string(),
            image_url: "https://img/shoe.png".to_string(),
            description: "A shoe".to_string(),
            price: 9.99,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["ownerId"], "u1");
        assert_eq!(json["imageUrl"], "https://img/shoe.png");
    }
}
