//! Conversion of native values into [`Value`] for writes.
//!
//! Unlike [`From`], conversion may fail: 128-bit integers outside the 64-bit
//! range and type-erased values of unknown types are rejected with
//! [`ValueError::UnsupportedType`].
use std::any::Any;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use super::{Array, Map, Timestamp, Value};
use crate::ValueError;

/// A native value that can be stored in a [`Value`].
pub trait Populate {
    /// Converts `self`, or reports why it has no JSON representation.
    ///
    /// # Errors
    ///
    /// [`ValueError::UnsupportedType`] when the value cannot be represented.
    fn into_value(self) -> Result<Value, ValueError>;
}

impl Value {
    /// Replaces the value with `v`. On failure the value is not modified.
    ///
    /// ```
    /// use jsonstruct::{Value, ValueError};
    ///
    /// let mut v = Value::from("keep");
    /// v.populate(7u16).unwrap();
    /// assert_eq!(v, Value::Uint(7));
    /// assert_eq!(v.populate(u128::MAX), Err(ValueError::UnsupportedType));
    /// assert_eq!(v, Value::Uint(7));
    /// ```
    ///
    /// # Errors
    ///
    /// [`ValueError::UnsupportedType`] when `v` cannot be represented.
    pub fn populate(&mut self, v: impl Populate) -> Result<(), ValueError> {
        *self = v.into_value()?;
        Ok(())
    }
}

impl Populate for Value {
    fn into_value(self) -> Result<Value, ValueError> {
        Ok(self)
    }
}

impl Populate for () {
    fn into_value(self) -> Result<Value, ValueError> {
        Ok(Value::Null)
    }
}

impl<T: Populate> Populate for Option<T> {
    fn into_value(self) -> Result<Value, ValueError> {
        self.map_or(Ok(Value::Null), Populate::into_value)
    }
}

impl Populate for bool {
    fn into_value(self) -> Result<Value, ValueError> {
        Ok(Value::from(self))
    }
}

macro_rules! populate_lossless {
    ($variant:ident as $wide:ty: $($t:ty),*) => {$(
        impl Populate for $t {
            fn into_value(self) -> Result<Value, ValueError> {
                Ok(Value::$variant(<$wide>::from(self)))
            }
        }
    )*};
}

populate_lossless!(Int as i64: i8, i16, i32, i64);
populate_lossless!(Uint as u64: u8, u16, u32, u64);
populate_lossless!(Float as f64: f32, f64);

// Pointer-sized and 128-bit integers keep their signedness when they fit
// 64 bits. A positive `i128` beyond `i64::MAX` still fits a `Uint`.
macro_rules! populate_checked {
    ($($t:ty),*) => {$(
        impl Populate for $t {
            fn into_value(self) -> Result<Value, ValueError> {
                if let Ok(v) = i64::try_from(self) {
                    Ok(Value::Int(v))
                } else if let Ok(v) = u64::try_from(self) {
                    Ok(Value::Uint(v))
                } else {
                    Err(ValueError::UnsupportedType)
                }
            }
        }
    )*};
}

macro_rules! populate_checked_unsigned {
    ($($t:ty),*) => {$(
        impl Populate for $t {
            fn into_value(self) -> Result<Value, ValueError> {
                u64::try_from(self)
                    .map(Value::Uint)
                    .map_err(|_| ValueError::UnsupportedType)
            }
        }
    )*};
}

populate_checked!(isize, i128);
populate_checked_unsigned!(usize, u128);

impl Populate for &str {
    fn into_value(self) -> Result<Value, ValueError> {
        Ok(Value::String(self.to_owned()))
    }
}

impl Populate for String {
    fn into_value(self) -> Result<Value, ValueError> {
        Ok(Value::String(self))
    }
}

impl Populate for &String {
    fn into_value(self) -> Result<Value, ValueError> {
        Ok(Value::String(self.clone()))
    }
}

impl<Tz: TimeZone> Populate for DateTime<Tz> {
    fn into_value(self) -> Result<Value, ValueError> {
        Ok(Value::Time(self.fixed_offset()))
    }
}

impl Populate for Map {
    fn into_value(self) -> Result<Value, ValueError> {
        Ok(Value::Object(self))
    }
}

impl Populate for Array {
    fn into_value(self) -> Result<Value, ValueError> {
        Ok(Value::Array(self))
    }
}

/// Downcasts to one of the supported types.
///
/// ```
/// use std::any::Any;
/// use jsonstruct::{Populate, Value, ValueError};
///
/// let n: &dyn Any = &5u8;
/// assert_eq!(n.into_value(), Ok(Value::Uint(5)));
/// let unknown: &dyn Any = &vec![1u8];
/// assert_eq!(unknown.into_value(), Err(ValueError::UnsupportedType));
/// ```
impl Populate for &dyn Any {
    fn into_value(self) -> Result<Value, ValueError> {
        macro_rules! try_cast {
            ($($t:ty),*) => {$(
                if let Some(v) = self.downcast_ref::<$t>() {
                    return v.clone().into_value();
                }
            )*};
        }
        try_cast!(
            Value,
            (),
            bool,
            i8,
            i16,
            i32,
            i64,
            i128,
            isize,
            u8,
            u16,
            u32,
            u64,
            u128,
            usize,
            f32,
            f64,
            String,
            &'static str,
            Timestamp,
            DateTime<Utc>,
            Map,
            Array
        );
        Err(ValueError::UnsupportedType)
    }
}
