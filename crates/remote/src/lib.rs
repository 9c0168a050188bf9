//! shop-remote: storefront actions against the remote document store.
//!
//! Each action performs one HTTP round-trip through a [`Transport`],
//! translates the JSON reply into `shop-core` records, and reports success by
//! emitting a [`ShopEvent`] to an injected [`EventSink`]. Failures are
//! returned as [`RemoteError`] and emit nothing.
//!
//! Two levels of abstraction:
//! - [`Transport`] -- executes a raw request (`http` over the network, `mock`
//!   scripted for tests)
//! - [`ShopClient`] -- the actions: `list_orders`, `create_order`,
//!   `list_products`, `create_product`, `update_product`

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod orders;
pub mod products;
pub mod transport;

pub use client::ShopClient;
pub use config::{RemoteConfig, DEFAULT_USER_ID};
pub use error::RemoteError;
pub use event::{EventSink, RecordingSink, ShopEvent};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
