//! Product edit form session.
//!
//! Wraps a [`FormState`] with the validation rules of the product inputs.
//! A new product tracks `title`, `imageUrl`, `description` and `price`, all
//! initially empty and invalid. An existing product is edited without a
//! `price` field and starts out valid; price input is ignored there.

use std::collections::BTreeMap;

use crate::form::{transition, FieldUpdateEvent, FormState};
use crate::model::{Product, ProductDraft};
use crate::validate::FieldRules;

pub const TITLE: &str = "title";
pub const IMAGE_URL: &str = "imageUrl";
pub const DESCRIPTION: &str = "description";
pub const PRICE: &str = "price";

/// Why a product form could not be submitted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// At least one tracked field is currently invalid.
    #[error("wrong input: please check the errors in the form ({})", .fields.join(", "))]
    Invalid { fields: Vec<String> },

    /// The price field passed validation but is not a usable number.
    #[error("invalid price '{value}'")]
    InvalidPrice { value: String },

    /// The field cannot be changed in this session.
    #[error("'{field}' cannot be changed on an existing product")]
    NotEditable { field: String },
}

/// One product editing session.
#[derive(Debug, Clone)]
pub struct ProductForm {
    product_id: Option<String>,
    state: FormState,
    rules: BTreeMap<&'static str, FieldRules>,
}

impl ProductForm {
    /// Form for a product that does not exist yet.
    pub fn new_product() -> Self {
        let state = FormState::with_fields([
            (TITLE, "", false),
            (IMAGE_URL, "", false),
            (DESCRIPTION, "", false),
            (PRICE, "", false),
        ]);
        ProductForm {
            product_id: None,
            state,
            rules: product_rules(),
        }
    }

    /// Form prefilled with an existing product. Price is not editable.
    pub fn edit(product: &Product) -> Self {
        let state = FormState::with_fields([
            (TITLE, product.title.as_str(), true),
            (IMAGE_URL, product.image_url.as_str(), true),
            (DESCRIPTION, product.description.as_str(), true),
        ]);
        let mut rules = product_rules();
        rules.remove(PRICE);
        ProductForm {
            product_id: Some(product.id.clone()),
            state,
            rules,
        }
    }

    /// Id of the edited product, `None` when creating one.
    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Rules configured for `field_id`; fields without rules accept any value.
    pub fn rules_for(&self, field_id: &str) -> FieldRules {
        self.rules.get(field_id).cloned().unwrap_or_default()
    }

    /// `Err(NotEditable)` for the price of an existing product.
    pub fn check_editable(&self, field_id: &str) -> Result<(), FormError> {
        if self.product_id.is_some() && field_id == PRICE {
            return Err(FormError::NotEditable {
                field: field_id.to_string(),
            });
        }
        Ok(())
    }

    /// Validate `value` with the field's rules and apply it to the state.
    /// Input for a field that is not editable leaves the state unchanged.
    pub fn input(&mut self, field_id: &str, value: &str) -> &FormState {
        let event = FieldUpdateEvent::validated(field_id, value, &self.rules_for(field_id));
        self.apply(&event)
    }

    /// Apply an event whose validity was computed elsewhere.
    pub fn apply(&mut self, event: &FieldUpdateEvent) -> &FormState {
        if self.check_editable(&event.field_id).is_ok() {
            self.state = transition(&self.state, event);
        }
        &self.state
    }

    /// Turn the current values into a draft, or explain why not.
    pub fn submit(&self) -> Result<ProductDraft, FormError> {
        if !self.state.is_valid() {
            return Err(FormError::Invalid {
                fields: self
                    .state
                    .invalid_fields()
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            });
        }

        let price = match self.state.value(PRICE).filter(|_| self.product_id.is_none()) {
            Some(raw) => {
                let parsed = raw.trim().parse::<f64>().map_err(|_| FormError::InvalidPrice {
                    value: raw.to_string(),
                })?;
                Some(parsed)
            }
            None => None,
        };

        let text = |field: &str| self.state.value(field).unwrap_or_default().to_string();
        Ok(ProductDraft {
            title: text(TITLE),
            image_url: text(IMAGE_URL),
            description: text(DESCRIPTION),
            price,
        })
    }
}

fn product_rules() -> BTreeMap<&'static str, FieldRules> {
    BTreeMap::from([
        (TITLE, FieldRules::required()),
        (IMAGE_URL, FieldRules::required()),
        (DESCRIPTION, FieldRules::required().with_min_length(5)),
        (PRICE, FieldRules::required().with_min(0.1)),
    ])
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
