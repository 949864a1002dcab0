//! Validated caption records.
//!
//! Model replies are untyped JSON. [`Caption::from_document`] checks them
//! against a JSON Schema derived from these records before decoding, so a
//! malformed reply fails with the JSON pointer of the offending member.

use once_cell::sync::Lazy;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{SchemaError, SchemaViolation};

/// One observed or inferred product characteristic.
///
/// `confidence` follows a prompt-side rubric (0.8-0.9 visible, 0.5-0.7
/// inferred, 0.3-0.4 uncertain, 0.0 for "Not visible") and is not range-checked.
/// It is kept as the number the model wrote, so `0` stays `0` on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub confidence: Number,
}

impl Attribute {
    pub fn confidence_score(&self) -> f64 {
        self.confidence.as_f64().unwrap_or_default()
    }
}

/// A complementary product suggested alongside the captioned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CrossSellProduct {
    pub category: String,
    pub product_name: String,
    pub search_query: String,
    pub description: String,
    pub attributes: Vec<Attribute>,
}

/// Structured description of a single product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Caption {
    pub product_name: String,
    pub description: String,
    pub attributes: Vec<Attribute>,
    pub user_needs: Vec<String>,
    pub cross_sell_products: Vec<CrossSellProduct>,
}

static CAPTION_VALIDATOR: Lazy<jsonschema::Validator> = Lazy::new(|| {
    let schema =
        serde_json::to_value(schema_for!(Caption)).expect("caption schema should serialize");
    jsonschema::validator_for(&schema).expect("caption schema should compile")
});

impl Caption {
    /// Validate an untyped document and decode it into a `Caption`.
    ///
    /// Unknown members are ignored. Every violation the validator finds is
    /// returned, each located by its JSON pointer.
    pub fn from_document(document: &Value) -> Result<Self, SchemaError> {
        let violations: Vec<SchemaViolation> = CAPTION_VALIDATOR
            .iter_errors(document)
            .map(|e| SchemaViolation {
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();
        if !violations.is_empty() {
            return Err(SchemaError { violations });
        }

        Caption::deserialize(document).map_err(|e| SchemaError {
            violations: vec![SchemaViolation {
                path: String::new(),
                message: e.to_string(),
            }],
        })
    }

    /// Canonical plain-document form, used for display and export.
    pub fn to_document(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
