//! shop-core: storefront models, form-state reducer and field validation.
//!
//! Everything here is pure: no I/O, no process-wide state. Remote actions
//! live in `shop-remote`.
//!
//! # Public API
//!
//! - [`transition`] -- apply one [`FieldUpdateEvent`] to a [`FormState`]
//! - [`FieldRules`] -- field-local validation producing the event's flag
//! - [`ProductForm`] -- the product edit form session
//! - [`OrderRecord`], [`Product`], [`CartItem`] -- domain records

pub mod form;
pub mod model;
pub mod product_form;
pub mod timestamp;
pub mod validate;

pub use form::{transition, FieldUpdateEvent, FormState};
pub use model::{CartItem, OrderRecord, Product, ProductDraft};
pub use product_form::{FormError, ProductForm};
pub use validate::FieldRules;
