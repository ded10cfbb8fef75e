//! Object and array operations.
//!
//! Containers are created explicitly with [`Value::as_object`] or
//! [`Value::as_array`]. Every mutating operation checks the tag first and
//! leaves the value untouched when it fails.
use super::{Array, Map, Value};
use crate::{ValueError, value::populate::Populate};

impl Value {
    /// Turns the value into an empty object, unless it already is one.
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// let mut v = Value::Int(3);
    /// v.as_object();
    /// v.set_key("a", true).unwrap();
    /// v.as_object();
    /// assert_eq!(v.size(), Some(1));
    /// ```
    pub fn as_object(&mut self) -> &mut Map {
        if !self.is_object() {
            *self = Self::Object(Map::new());
        }
        match self {
            Self::Object(m) => m,
            _ => unreachable!("value was just made an object"),
        }
    }

    /// Turns the value into an empty array, unless it already is one.
    pub fn as_array(&mut self) -> &mut Array {
        if !self.is_array() {
            *self = Self::Array(Array::new());
        }
        match self {
            Self::Array(a) => a,
            _ => unreachable!("value was just made an array"),
        }
    }

    /// Inserts or replaces `key`.
    ///
    /// # Errors
    ///
    /// [`ValueError::NotObject`] if the value is not an object, or
    /// [`ValueError::UnsupportedType`] if `v` has no JSON representation.
    pub fn set_key(&mut self, key: impl Into<String>, v: impl Populate) -> Result<(), ValueError> {
        let Self::Object(map) = self else {
            return Err(ValueError::NotObject);
        };
        let v = v.into_value()?;
        map.insert(key.into(), v);
        Ok(())
    }

    /// The member named `key`. `None` for missing keys and non-objects.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Object(m) => m.get(key),
            _ => None,
        }
    }

    /// Mutable access to the member named `key`.
    pub fn get_key_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Self::Object(m) => m.get_mut(key),
            _ => None,
        }
    }

    /// Whether the value is an object holding `key`.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.get_key(key).is_some()
    }

    /// Removes `key` and returns what it held.
    pub fn remove_key(&mut self, key: &str) -> Option<Value> {
        match self {
            Self::Object(m) => m.remove(key),
            _ => None,
        }
    }

    /// Member names in sorted order. Empty for non-objects.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let map = match self {
            Self::Object(m) => Some(m),
            _ => None,
        };
        map.into_iter().flat_map(|m| m.keys().map(String::as_str))
    }

    /// Appends to the end of an array.
    ///
    /// # Errors
    ///
    /// [`ValueError::NotArray`] if the value is not an array, or
    /// [`ValueError::UnsupportedType`] if `v` has no JSON representation.
    pub fn push(&mut self, v: impl Populate) -> Result<(), ValueError> {
        let Self::Array(arr) = self else {
            return Err(ValueError::NotArray);
        };
        arr.push(v.into_value()?);
        Ok(())
    }

    /// Removes the last element. `None` when empty or not an array.
    pub fn pop(&mut self) -> Option<Value> {
        match self {
            Self::Array(a) => a.pop(),
            _ => None,
        }
    }

    /// Removes the first element. `None` when empty or not an array.
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// let mut v = Value::Array(vec![Value::Int(1), Value::Int(2)]);
    /// assert_eq!(v.shift(), Some(Value::Int(1)));
    /// assert_eq!(v.shift(), Some(Value::Int(2)));
    /// assert_eq!(v.shift(), None);
    /// ```
    pub fn shift(&mut self) -> Option<Value> {
        match self {
            Self::Array(a) if !a.is_empty() => Some(a.remove(0)),
            _ => None,
        }
    }

    /// The element at `i`. `None` for negative or out of range indexes and
    /// non-arrays.
    #[must_use]
    pub fn get_index(&self, i: isize) -> Option<&Value> {
        let i = usize::try_from(i).ok()?;
        match self {
            Self::Array(a) => a.get(i),
            _ => None,
        }
    }

    /// Mutable access to the element at `i`.
    pub fn get_index_mut(&mut self, i: isize) -> Option<&mut Value> {
        let i = usize::try_from(i).ok()?;
        match self {
            Self::Array(a) => a.get_mut(i),
            _ => None,
        }
    }

    /// Stores `v` at `i`, growing the array with `null` when `i` is past
    /// the end.
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// let mut v = Value::Array(vec![]);
    /// v.set_index(2, "c").unwrap();
    /// assert_eq!(v.to_string(), r#"[null,null,"c"]"#);
    /// ```
    ///
    /// # Errors
    ///
    /// [`ValueError::NotArray`] if the value is not an array,
    /// [`ValueError::IndexOutOfRange`] if `i` is negative or the padding
    /// cannot be allocated, or
    /// [`ValueError::UnsupportedType`] if `v` has no JSON representation.
    pub fn set_index(&mut self, i: isize, v: impl Populate) -> Result<(), ValueError> {
        let Self::Array(arr) = self else {
            return Err(ValueError::NotArray);
        };
        let i = usize::try_from(i).map_err(|_| ValueError::IndexOutOfRange)?;
        let v = v.into_value()?;
        if i >= arr.len() {
            arr.try_reserve(i + 1 - arr.len())
                .map_err(|_| ValueError::IndexOutOfRange)?;
            arr.resize(i + 1, Value::Null);
        }
        arr[i] = v;
        Ok(())
    }
}
