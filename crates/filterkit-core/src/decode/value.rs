use crate::types::{Date, Float64, Timestamp, Ulid};
use std::str::FromStr;

///
/// FromParamValue
///
/// Parse one textual parameter value. The error is a human-readable
/// reason; the decoder attaches the field and operator.
///

pub trait FromParamValue: Sized {
    fn from_param(raw: &str) -> Result<Self, String>;
}

// Types whose `FromStr` already speaks the wire form.
macro_rules! impl_from_param_via_from_str {
    ($($type:ty),* $(,)?) => {
        $(
            impl FromParamValue for $type {
                fn from_param(raw: &str) -> Result<Self, String> {
                    <$type as FromStr>::from_str(raw).map_err(|err| err.to_string())
                }
            }
        )*
    };
}

impl_from_param_via_from_str!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, String, Date, Timestamp,
);

// Floats must be finite; NaN and infinities have no place in a range.
macro_rules! impl_from_param_float {
    ($($type:ty),* $(,)?) => {
        $(
            impl FromParamValue for $type {
                fn from_param(raw: &str) -> Result<Self, String> {
                    let value = raw.parse::<$type>().map_err(|err| err.to_string())?;
                    if value.is_finite() {
                        Ok(value)
                    } else {
                        Err(format!("{raw} is not a finite number"))
                    }
                }
            }
        )*
    };
}

impl_from_param_float!(f32, f64);

impl FromParamValue for Float64 {
    fn from_param(raw: &str) -> Result<Self, String> {
        let value = f64::from_param(raw)?;

        Self::try_new(value).ok_or_else(|| format!("{raw} is not a finite number"))
    }
}

impl FromParamValue for Ulid {
    fn from_param(raw: &str) -> Result<Self, String> {
        Self::from_string(raw).map_err(|err| err.to_string())
    }
}
