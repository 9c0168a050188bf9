//! State-change events emitted by successful actions.
//!
//! Actions never touch application state directly. They hand a [`ShopEvent`]
//! to an injected [`EventSink`]; whoever owns the application state decides
//! what to do with it.

use std::sync::Mutex;

use shop_core::{OrderRecord, Product};
use tokio::sync::mpsc::UnboundedSender;

/// Something the application-state layer should apply.
#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
    /// Replace the known orders with this collection.
    SetOrders(Vec<OrderRecord>),
    /// A newly placed order.
    AddOrder(OrderRecord),
    /// Replace the known products with this collection.
    SetProducts(Vec<Product>),
    /// A newly created product.
    CreateProduct(Product),
    /// Editable fields of an existing product changed.
    UpdateProduct {
        id: String,
        title: String,
        description: String,
        image_url: String,
    },
}

impl ShopEvent {
    /// Short name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ShopEvent::SetOrders(_) => "SET_ORDERS",
            ShopEvent::AddOrder(_) => "ADD_ORDER",
            ShopEvent::SetProducts(_) => "SET_PRODUCTS",
            ShopEvent::CreateProduct(_) => "CREATE_PRODUCT",
            ShopEvent::UpdateProduct { .. } => "UPDATE_PRODUCT",
        }
    }
}

/// Receiver of emitted events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ShopEvent);
}

/// Forwards events over a channel to a task owning the application state.
///
/// A closed channel means nobody is listening any more; the event is dropped
/// with a warning.
impl EventSink for UnboundedSender<ShopEvent> {
    fn emit(&self, event: ShopEvent) {
        let kind = event.kind();
        if self.send(event).is_err() {
            tracing::warn!(event = kind, "event receiver closed, event dropped");
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ShopEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ShopEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ShopEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
