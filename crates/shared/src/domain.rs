use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Wire value the products API stores once a product runs out of stock.
pub const UNAVAILABLE_QUANTITY: &str = "Product is not Available";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Units left in stock. Once the count drops to zero the product is marked
/// [`Quantity::Unavailable`] rather than holding a zero or negative count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Available(i64),
    Unavailable,
}

impl Quantity {
    /// Quantity after selling a single unit.
    pub fn decremented(self) -> Self {
        match self {
            Quantity::Available(count) => {
                let next = count.saturating_sub(1);
                if next <= 0 {
                    Quantity::Unavailable
                } else {
                    Quantity::Available(next)
                }
            }
            Quantity::Unavailable => Quantity::Unavailable,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Quantity::Available(_))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Available(count) => write!(f, "{count}"),
            Quantity::Unavailable => f.write_str(UNAVAILABLE_QUANTITY),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::Available(count) => serializer.serialize_i64(*count),
            Quantity::Unavailable => serializer.serialize_str(UNAVAILABLE_QUANTITY),
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawQuantity {
            Count(i64),
            Real(f64),
            Text(String),
        }

        match RawQuantity::deserialize(deserializer)? {
            RawQuantity::Count(count) => Ok(Quantity::Available(count)),
            // Some stores persist counts as doubles (`3.0`).
            RawQuantity::Real(real) if real.fract() == 0.0 && real.abs() < i64::MAX as f64 => {
                Ok(Quantity::Available(real as i64))
            }
            RawQuantity::Real(real) => Err(de::Error::custom(format!(
                "invalid product quantity {real}"
            ))),
            RawQuantity::Text(text) if text == UNAVAILABLE_QUANTITY => Ok(Quantity::Unavailable),
            // Form submissions send numbers as strings.
            RawQuantity::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(Quantity::Available)
                .map_err(|_| de::Error::custom(format!("invalid product quantity {text:?}"))),
        }
    }
}

/// One catalog entry. Only `_id` and `quantity` are interpreted; every other
/// field is carried through to and from the API untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProduct")]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub quantity: Quantity,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawProduct {
    #[serde(rename = "_id", default)]
    id: Option<ProductId>,
    quantity: Quantity,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl From<RawProduct> for Product {
    /// A plain string `id` stands in for a missing `_id`. When both are sent
    /// (Mongoose virtuals) `_id` wins and `id` stays an ordinary field.
    fn from(raw: RawProduct) -> Self {
        let RawProduct {
            mut id,
            quantity,
            mut fields,
        } = raw;
        if id.is_none() {
            if let Some(Value::String(plain)) = fields.get("id") {
                id = Some(ProductId(plain.clone()));
                fields.remove("id");
            }
        }
        Self {
            id,
            quantity,
            fields,
        }
    }
}

impl Product {
    pub fn new(quantity: Quantity) -> Self {
        Self {
            id: None,
            quantity,
            fields: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn has_id(&self, id: &ProductId) -> bool {
        self.id.as_ref() == Some(id)
    }

    pub fn display_name(&self) -> String {
        if let Some(Value::String(name)) = self.fields.get("name") {
            return name.clone();
        }
        match &self.id {
            Some(id) => id.to_string(),
            None => "(unnamed product)".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
