use crate::{
    types::{Date, Float64, Timestamp, Ulid},
    value::Value,
};

///
/// FieldValue
///
/// Conversion between a typed field value and the runtime `Value`
/// carried by predicates. `Filter<T>` ties its value type to the field
/// through this trait, so type mismatches are rejected at compile time.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for Ulid {
    fn to_value(&self) -> Value {
        Value::Ulid(*self)
    }
}

// Signed integers widen into `Value::Int`.
macro_rules! impl_field_value_int {
    ($($type:ty),* $(,)?) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

// Unsigned integers widen into `Value::Uint`.
macro_rules! impl_field_value_uint {
    ($($type:ty),* $(,)?) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::Uint(u64::from(*self))
                }
            }
        )*
    };
}

impl_field_value_int!(i8, i16, i32, i64);
impl_field_value_uint!(u8, u16, u32, u64);

impl FieldValue for f64 {
    // Non-finite floats have no ordering, so they degrade to null.
    fn to_value(&self) -> Value {
        Float64::try_new(*self).map_or(Value::Null, Value::Float64)
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        f64::from(*self).to_value()
    }
}

///
/// OrderedValue
///
/// Marker for field values with a total order in the predicate algebra.
/// Range bounds can only be compiled for these.
///

pub trait OrderedValue: FieldValue {}

macro_rules! impl_ordered_value {
    ($($type:ty),* $(,)?) => {
        $(impl OrderedValue for $type {})*
    };
}

impl_ordered_value!(
    i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Date, Float64, String, Timestamp, Ulid,
);
