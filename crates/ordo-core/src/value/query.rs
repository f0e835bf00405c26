use crate::{
    enumerable::{Enumerator, OrderedEnumerator},
    error::Error,
    obs::sink::{MetricsEvent, record},
    value::Value,
};
use std::{fmt, str::FromStr};

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

///
/// FieldKey
///
/// Dotted path selecting a nested value out of a `Value`.
/// Text segments look up map entries; numeric segments index into lists.
/// A path that does not resolve selects `Value::Null`.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FieldKey {
    segments: Vec<String>,
}

impl FieldKey {
    /// Parse a dotted path such as `"owner.name"` or `"tags.0"`.
    pub fn parse(path: &str) -> Result<Self, Error> {
        let path = path.trim();
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(reject(Error::missing_argument("key_selector")));
        }

        Ok(Self {
            segments: path.split('.').map(str::to_string).collect(),
        })
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve this path against `value`.
    #[must_use]
    pub fn select(&self, value: &Value) -> Value {
        let mut current = value;
        for segment in &self.segments {
            let next = match current {
                Value::Map(_) => current.field(segment),
                Value::List(_) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| current.at(index)),
                _ => None,
            };

            match next {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }

        current.clone()
    }
}

impl FromStr for FieldKey {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::parse(path)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

///
/// ValueQuery
///
/// Entry point for ordering dynamically shaped data. Validates the source
/// and key paths up front, so a returned enumerator never fails later for a
/// shape reason.
///
/// List → one element per item.
/// Map  → one `[name, value]` pair per entry, in entry order.
///

#[derive(Clone, Debug)]
pub struct ValueQuery {
    source: Enumerator<Value>,
}

impl ValueQuery {
    /// Wrap a list or map value. `Null` is a missing source; every other
    /// scalar is the wrong shape.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let items = match value {
            Value::Null => return Err(reject(Error::missing_argument("source"))),
            Value::List(items) => items,
            Value::Map(entries) => entries
                .into_iter()
                .map(|(name, value)| Value::List(vec![Value::Text(name), value]))
                .collect(),
            other => {
                return Err(reject(Error::invalid_type(
                    "source",
                    "a list or map",
                    &other,
                )));
            }
        };

        Ok(Self {
            source: Enumerator::from_vec(items),
        })
    }

    #[must_use]
    pub const fn enumerator(&self) -> &Enumerator<Value> {
        &self.source
    }

    pub fn order_by(&self, field: &str) -> Result<OrderedEnumerator<Value>, Error> {
        let key = FieldKey::parse(field)?;

        Ok(self
            .source
            .order_by_with(move |item| key.select(item), Value::comparer()))
    }

    pub fn order_by_descending(&self, field: &str) -> Result<OrderedEnumerator<Value>, Error> {
        let key = FieldKey::parse(field)?;

        Ok(self
            .source
            .order_by_descending_with(move |item| key.select(item), Value::comparer()))
    }

    /// Apply a list of field orders: the first entry is the primary
    /// key, each later entry refines ties of the ones before it.
    pub fn order_by_fields(
        &self,
        fields: &[(&str, OrderDirection)],
    ) -> Result<OrderedEnumerator<Value>, Error> {
        let Some(((first, direction), rest)) = fields.split_first() else {
            return Err(reject(Error::missing_argument("key_selector")));
        };

        let mut ordered = match direction {
            OrderDirection::Asc => self.order_by(first)?,
            OrderDirection::Desc => self.order_by_descending(first)?,
        };
        for (field, direction) in rest {
            ordered = match direction {
                OrderDirection::Asc => ordered.then_by_field(field)?,
                OrderDirection::Desc => ordered.then_by_field_descending(field)?,
            };
        }

        Ok(ordered)
    }
}

impl TryFrom<Value> for ValueQuery {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl OrderedEnumerator<Value> {
    /// Refine ties by the value at `field`, ascending.
    pub fn then_by_field(&self, field: &str) -> Result<Self, Error> {
        let key = FieldKey::parse(field)?;

        Ok(self.then_by_with(move |item| key.select(item), Value::comparer()))
    }

    /// Refine ties by the value at `field`, descending.
    pub fn then_by_field_descending(&self, field: &str) -> Result<Self, Error> {
        let key = FieldKey::parse(field)?;

        Ok(self.then_by_descending_with(move |item| key.select(item), Value::comparer()))
    }
}

fn reject(err: Error) -> Error {
    record(MetricsEvent::ValidationRejected { kind: err.kind });

    err
}
