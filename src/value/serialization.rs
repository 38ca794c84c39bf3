//! Serde support for [`Value`].
//!
//! Plain objects serialize as maps (own enumerable properties in enumeration
//! order), arrays and argument lists as sequences, boxed primitives as the
//! primitive. `Undefined` and functions serialize as "none"; `Null` as unit.
//!
//! Deserialization accepts any self-describing input and produces plain
//! objects, arrays and primitives. Both unit and "none" become `Null`.

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ClassTag, Object, Value};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Undefined => serializer.serialize_none(),
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::String(text) => serializer.serialize_str(text),
            Self::Object(object) => serialize_object(object, serializer),
        }
    }
}

fn serialize_object<S>(object: &Object, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match object.class_tag() {
        ClassTag::Function => serializer.serialize_none(),
        ClassTag::Boolean | ClassTag::Number | ClassTag::String => object
            .primitive()
            .map(Value::from)
            .unwrap_or_default()
            .serialize(serializer),
        ClassTag::Array | ClassTag::Arguments => {
            let elements = object.elements().unwrap_or_default();
            let mut seq = serializer.serialize_seq(Some(elements.len()))?;
            for element in &elements {
                seq.serialize_element(element)?;
            }
            seq.end()
        }
        ClassTag::Object => {
            let entries = object.own_entries();
            let mut map = serializer.serialize_map(Some(entries.len()))?;
            for (key, value) in &entries {
                map.serialize_entry(key.as_str(), value)?;
            }
            map.end()
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any value")
    }

    fn visit_bool<E>(self, flag: bool) -> Result<Value, E> {
        Ok(Value::Bool(flag))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E>(self, number: i64) -> Result<Value, E> {
        Ok(Value::Number(number as f64))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E>(self, number: u64) -> Result<Value, E> {
        Ok(Value::Number(number as f64))
    }

    fn visit_f64<E>(self, number: f64) -> Result<Value, E> {
        Ok(Value::Number(number))
    }

    fn visit_str<E>(self, text: &str) -> Result<Value, E> {
        Ok(Value::from(text))
    }

    fn visit_string<E>(self, text: String) -> Result<Value, E> {
        Ok(Value::from(text))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(Value::array(elements))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let object = Object::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            object.set(key, value);
        }
        Ok(Value::Object(object))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}
