//! Shared, mutable objects.
//!
//! An [`Object`] is a reference-counted cell holding a class (plain, array,
//! arguments, function or boxed primitive), an ordered list of own named
//! properties and an optional prototype. Cloning an `Object` clones the
//! handle, not the contents, so identity survives being passed around.
//!
//! Locks are taken for the duration of a single read or write. No method
//! calls back into user code while holding one.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::function::NativeFn;
use super::key::{PropertyKey, enumeration_order};
use super::Value;

/// A primitive held inside a wrapper object.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A boxed boolean.
    Bool(bool),
    /// A boxed number.
    Number(f64),
    /// A boxed string.
    String(Arc<str>),
}

/// The observable classification of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassTag {
    /// A plain key/value object.
    Object,
    /// A dense array.
    Array,
    /// An argument list.
    Arguments,
    /// A callable object.
    Function,
    /// A boxed boolean.
    Boolean,
    /// A boxed number.
    Number,
    /// A boxed string.
    String,
}

/// The largest element list a single write may grow an array to.
///
/// Index and `length` writes past this bound are ignored, since elements are
/// stored densely.
pub const MAX_DENSE_LENGTH: usize = 1 << 24;

pub(crate) enum Class {
    Plain,
    Array(Vec<Value>),
    Arguments(Vec<Value>),
    Function(NativeFn),
    Boxed(Primitive),
}

struct Slot {
    key: PropertyKey,
    value: Value,
    enumerable: bool,
}

struct ObjectData {
    class: Class,
    slots: Vec<Slot>,
    positions: FxHashMap<PropertyKey, usize>,
    prototype: Option<Object>,
}

impl ObjectData {
    fn slot(&self, key: &PropertyKey) -> Option<&Slot> {
        self.positions.get(key).map(|&position| &self.slots[position])
    }

    fn slot_mut(&mut self, key: &PropertyKey) -> Option<&mut Slot> {
        let position = *self.positions.get(key)?;
        Some(&mut self.slots[position])
    }

    fn own(&self, key: &PropertyKey) -> Option<Value> {
        match &self.class {
            Class::Array(elements) | Class::Arguments(elements) => {
                if key.is_length() {
                    return Some(Value::from(elements.len()));
                }
                if let Some(index) = key.as_index() {
                    return elements.get(index).cloned();
                }
            }
            Class::Boxed(Primitive::String(text)) => {
                if key.is_length() {
                    return Some(Value::from(text.chars().count()));
                }
                if let Some(index) = key.as_index() {
                    return text.chars().nth(index).map(Value::from);
                }
            }
            Class::Plain | Class::Function(_) | Class::Boxed(_) => {}
        }
        self.slot(key).map(|slot| slot.value.clone())
    }

    fn upsert(&mut self, key: PropertyKey, value: Value, enumerable: bool) {
        if let Some(slot) = self.slot_mut(&key) {
            slot.value = value;
        } else {
            self.positions.insert(key.clone(), self.slots.len());
            self.slots.push(Slot {
                key,
                value,
                enumerable,
            });
        }
    }

    fn remove_slot(&mut self, key: &PropertyKey) -> bool {
        let Some(removed) = self.positions.remove(key) else {
            return false;
        };
        self.slots.remove(removed);
        for position in self.positions.values_mut() {
            if *position > removed {
                *position -= 1;
            }
        }
        true
    }

    /// Whether `key` names an element (or the length) rather than a slot.
    fn is_element_key(&self, key: &PropertyKey) -> bool {
        match &self.class {
            Class::Array(_) | Class::Arguments(_) | Class::Boxed(Primitive::String(_)) => {
                key.is_length() || key.as_index().is_some()
            }
            Class::Plain | Class::Function(_) | Class::Boxed(_) => false,
        }
    }

    /// Moves every directly held object out of this one.
    fn detach_children(&mut self, pending: &mut Vec<Object>) {
        let mut collect = |value: Value| {
            if let Value::Object(object) = value {
                pending.push(object);
            }
        };
        if let Class::Array(elements) | Class::Arguments(elements) = &mut self.class {
            std::mem::take(elements).into_iter().for_each(&mut collect);
        }
        self.positions.clear();
        std::mem::take(&mut self.slots)
            .into_iter()
            .for_each(|slot| collect(slot.value));
        if let Some(prototype) = self.prototype.take() {
            pending.push(prototype);
        }
    }
}

impl Drop for ObjectData {
    /// Releases nested objects with a worklist so that dropping a deeply
    /// nested value does not recurse once per level.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(object) = pending.pop() {
            if let Some(cell) = Arc::into_inner(object.0) {
                cell.into_inner().detach_children(&mut pending);
            }
        }
    }
}

/// A handle to a shared object.
///
/// # Examples
///
/// ```rust
/// use utilbelt::value::{Object, Value};
///
/// let parent = Object::new();
/// parent.set("inherited", 1);
///
/// let child = Object::with_prototype(&parent);
/// child.set("own", 2);
///
/// assert!(child.has("inherited"));
/// assert!(!child.has_own("inherited"));
/// assert_eq!(child.own_keys().len(), 1);
/// ```
#[derive(Clone)]
pub struct Object(Arc<RwLock<ObjectData>>);

impl Object {
    pub(crate) fn from_class(class: Class) -> Self {
        Self(Arc::new(RwLock::new(ObjectData {
            class,
            slots: Vec::new(),
            positions: FxHashMap::default(),
            prototype: None,
        })))
    }

    /// Creates an empty plain object.
    #[must_use]
    pub fn new() -> Self {
        Self::from_class(Class::Plain)
    }

    /// Creates an empty plain object inheriting from `prototype`.
    #[must_use]
    pub fn with_prototype(prototype: &Self) -> Self {
        let object = Self::new();
        object.0.write().prototype = Some(prototype.clone());
        object
    }

    /// Creates an array object holding `elements`.
    #[must_use]
    pub fn array(elements: Vec<Value>) -> Self {
        Self::from_class(Class::Array(elements))
    }

    /// Creates an argument-list object holding `elements`.
    #[must_use]
    pub fn arguments(elements: Vec<Value>) -> Self {
        Self::from_class(Class::Arguments(elements))
    }

    /// Creates a wrapper object around a primitive.
    #[must_use]
    pub fn boxed(primitive: Primitive) -> Self {
        Self::from_class(Class::Boxed(primitive))
    }

    /// Returns the class of this object.
    #[must_use]
    pub fn class_tag(&self) -> ClassTag {
        match &self.0.read().class {
            Class::Plain => ClassTag::Object,
            Class::Array(_) => ClassTag::Array,
            Class::Arguments(_) => ClassTag::Arguments,
            Class::Function(_) => ClassTag::Function,
            Class::Boxed(Primitive::Bool(_)) => ClassTag::Boolean,
            Class::Boxed(Primitive::Number(_)) => ClassTag::Number,
            Class::Boxed(Primitive::String(_)) => ClassTag::String,
        }
    }

    /// Returns `true` if this object is a function.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self.0.read().class, Class::Function(_))
    }

    pub(crate) fn native(&self) -> Option<NativeFn> {
        match &self.0.read().class {
            Class::Function(body) => Some(Arc::clone(body)),
            _ => None,
        }
    }

    /// Returns the wrapped primitive of a boxed object.
    #[must_use]
    pub fn primitive(&self) -> Option<Primitive> {
        match &self.0.read().class {
            Class::Boxed(primitive) => Some(primitive.clone()),
            _ => None,
        }
    }

    /// Returns `true` if both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the prototype, if any.
    #[must_use]
    pub fn prototype(&self) -> Option<Self> {
        self.0.read().prototype.clone()
    }

    /// Replaces the prototype.
    ///
    /// Returns `false` and leaves the object untouched if the new prototype
    /// would make the chain cyclic.
    pub fn set_prototype(&self, prototype: Option<&Self>) -> bool {
        let mut cursor = prototype.cloned();
        while let Some(current) = cursor {
            if current.ptr_eq(self) {
                return false;
            }
            cursor = current.prototype();
        }
        self.0.write().prototype = prototype.cloned();
        true
    }

    /// Returns the own property `key`, enumerable or not.
    pub fn get_own(&self, key: impl Into<PropertyKey>) -> Option<Value> {
        self.0.read().own(&key.into())
    }

    /// Returns `true` if `key` is an own property (inherited ones do not count).
    pub fn has_own(&self, key: impl Into<PropertyKey>) -> bool {
        self.get_own(key).is_some()
    }

    /// Looks `key` up on this object, then along its prototype chain.
    pub fn get(&self, key: impl Into<PropertyKey>) -> Value {
        self.lookup(&key.into()).unwrap_or_default()
    }

    /// Returns `true` if `key` is an own or inherited property.
    pub fn has(&self, key: impl Into<PropertyKey>) -> bool {
        self.lookup(&key.into()).is_some()
    }

    fn lookup(&self, key: &PropertyKey) -> Option<Value> {
        let mut cursor = Some(self.clone());
        while let Some(current) = cursor {
            let next = {
                let data = current.0.read();
                if let Some(value) = data.own(key) {
                    return Some(value);
                }
                data.prototype.clone()
            };
            cursor = next;
        }
        None
    }

    /// Sets an enumerable own property.
    ///
    /// On arrays and argument lists an index key writes the element (growing
    /// the list with `Undefined` as needed) and `length` resizes. Writes that
    /// would grow the list past [`MAX_DENSE_LENGTH`] are ignored. The index
    /// and `length` of a boxed string are read-only.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut data = self.0.write();
        match &mut data.class {
            Class::Array(elements) | Class::Arguments(elements) => {
                if let Some(index) = key.as_index() {
                    if index < elements.len() {
                        elements[index] = value;
                    } else if index < MAX_DENSE_LENGTH {
                        elements.resize(index + 1, Value::Undefined);
                        elements[index] = value;
                    } else {
                        tracing::debug!(index, "element write past the dense limit ignored");
                    }
                    return;
                }
                if key.is_length() {
                    match value.as_array_length() {
                        Some(length) if length <= elements.len().max(MAX_DENSE_LENGTH) => {
                            elements.resize(length, Value::Undefined);
                        }
                        _ => tracing::debug!(%value, "length write ignored"),
                    }
                    return;
                }
            }
            Class::Boxed(Primitive::String(_)) if key.is_length() || key.as_index().is_some() => {
                return;
            }
            Class::Plain | Class::Function(_) | Class::Boxed(_) => {}
        }
        data.upsert(key, value, true);
    }

    /// Defines (or overwrites) a non-enumerable own property.
    ///
    /// Element indices and `length` of arrays, argument lists and boxed
    /// strings cannot be hidden; such calls are ignored.
    pub fn define_hidden(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut data = self.0.write();
        if data.is_element_key(&key) {
            tracing::debug!(%key, "hidden element definition ignored");
            return;
        }
        if let Some(slot) = data.slot_mut(&key) {
            slot.value = value;
            slot.enumerable = false;
        } else {
            data.upsert(key, value, false);
        }
    }

    /// Removes an own named property. Returns `true` if one was removed.
    ///
    /// Elements of arrays are reset to `Undefined` rather than removed.
    pub fn delete(&self, key: impl Into<PropertyKey>) -> bool {
        let key = key.into();
        let mut data = self.0.write();
        if let Class::Array(elements) | Class::Arguments(elements) = &mut data.class {
            if let Some(index) = key.as_index() {
                return elements.get_mut(index).is_some_and(|element| {
                    *element = Value::Undefined;
                    true
                });
            }
        }
        data.remove_slot(&key)
    }

    /// Returns the own enumerable keys in enumeration order.
    ///
    /// Element indices of arrays, argument lists and boxed strings come
    /// first, followed by named properties.
    #[must_use]
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let data = self.0.read();
        let element_count = match &data.class {
            Class::Array(elements) | Class::Arguments(elements) => elements.len(),
            Class::Boxed(Primitive::String(text)) => text.chars().count(),
            Class::Plain | Class::Function(_) | Class::Boxed(_) => 0,
        };
        let named = data
            .slots
            .iter()
            .filter(|slot| slot.enumerable)
            .map(|slot| slot.key.clone())
            .collect();
        let mut keys: Vec<PropertyKey> = (0..element_count).map(PropertyKey::from).collect();
        keys.extend(enumeration_order(named));
        keys
    }

    /// Returns a snapshot of the elements of an array or argument list.
    #[must_use]
    pub fn elements(&self) -> Option<Vec<Value>> {
        match &self.0.read().class {
            Class::Array(elements) | Class::Arguments(elements) => Some(elements.clone()),
            _ => None,
        }
    }

    /// Returns the element at `index` of an array or argument list.
    #[must_use]
    pub fn element(&self, index: usize) -> Option<Value> {
        match &self.0.read().class {
            Class::Array(elements) | Class::Arguments(elements) => elements.get(index).cloned(),
            _ => None,
        }
    }

    /// Appends to an array or argument list. Does nothing on other classes.
    pub fn push(&self, value: impl Into<Value>) {
        if let Class::Array(elements) | Class::Arguments(elements) = &mut self.0.write().class {
            if elements.len() < MAX_DENSE_LENGTH {
                elements.push(value.into());
            }
        }
    }

    /// Copies the own enumerable key/value pairs, in enumeration order.
    #[must_use]
    pub fn own_entries(&self) -> Vec<(PropertyKey, Value)> {
        self.own_keys()
            .into_iter()
            .map(|key| {
                let value = self.get_own(&key).unwrap_or_default();
                (key, value)
            })
            .collect()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", Value::Object(self.clone()))
    }
}
