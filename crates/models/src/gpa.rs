use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Custom error type for grade point averages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpaError {
    NotFinite,
    OutOfRange(f64),
    Unparsable,
}

impl Display for GpaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NotFinite => write!(f, "GPA must be a finite number"),
            Self::OutOfRange(value) => {
                write!(f, "GPA {value} is outside {}..={}", Gpa::MIN, Gpa::MAX)
            }
            Self::Unparsable => write!(f, "GPA is not a number"),
        }
    }
}

impl std::error::Error for GpaError {}

/// A grade point average on the 0.0 to 4.0 scale
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gpa(f64);

impl Gpa {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 4.0;

    pub fn new(value: f64) -> Result<Self, GpaError> {
        if !value.is_finite() {
            return Err(GpaError::NotFinite);
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(GpaError::OutOfRange(value));
        }

        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Gpa {
    type Error = GpaError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Gpa> for f64 {
    fn from(gpa: Gpa) -> Self {
        gpa.0
    }
}

impl FromStr for Gpa {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<f64>().map_err(|_| GpaError::Unparsable)?;
        Self::new(value)
    }
}

impl Display for Gpa {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

// Stored as a plain double; rows written by other tools are read back without range checks
#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for Gpa {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::Double(Some(value)) => Ok(Gpa(value)),
            Value::Float(Some(value)) => Ok(Gpa(f64::from(value))),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "Gpa".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::Double
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Double
    }
}

#[cfg(feature = "database")]
impl From<Gpa> for Value {
    fn from(gpa: Gpa) -> Self {
        Value::Double(Some(gpa.0))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for Gpa {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: f64 = res.try_get_by(index)?;
        Ok(Gpa(val))
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for Gpa {
    fn null() -> Value {
        Value::Double(None)
    }
}
