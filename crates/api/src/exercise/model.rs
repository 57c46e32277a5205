use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store assigned identifier of an [`Exercise`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(i64);

impl ExerciseId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ExerciseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ExerciseId> for i64 {
    fn from(value: ExerciseId) -> Self {
        value.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("malformed exercise id: {0}")]
pub struct MalformedIdError(pub String);

// Only the form Display produces is accepted, so "+1" and "01" do not
// alias id 1.
impl FromStr for ExerciseId {
    type Err = MalformedIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .ok()
            .filter(|id| id.to_string() == s)
            .map(ExerciseId)
            .ok_or_else(|| MalformedIdError(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Lbs,
    Kgs,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Lbs => "lbs",
            Unit::Kgs => "kgs",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("unsupported unit: {0}")]
pub struct UnsupportedUnitError(pub String);

// Units are matched exactly, "LBS" is not a unit.
impl FromStr for Unit {
    type Err = UnsupportedUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lbs" => Ok(Unit::Lbs),
            "kgs" => Ok(Unit::Kgs),
            _ => Err(UnsupportedUnitError(s.to_string())),
        }
    }
}

/// The five client supplied fields of a logged set.
///
/// Values of this type only come out of the validator, so every field
/// already satisfies the domain rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseFields {
    pub name: String,
    pub reps: i64,
    pub weight: i64,
    pub unit: Unit,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "_id")]
    pub id: ExerciseId,
    pub name: String,
    pub reps: i64,
    pub weight: i64,
    pub unit: Unit,
    pub date: String,
}

impl Exercise {
    pub fn from_fields(id: ExerciseId, fields: ExerciseFields) -> Self {
        Self {
            id,
            name: fields.name,
            reps: fields.reps,
            weight: fields.weight,
            unit: fields.unit,
            date: fields.date,
        }
    }

    pub fn fields(&self) -> ExerciseFields {
        ExerciseFields {
            name: self.name.clone(),
            reps: self.reps,
            weight: self.weight,
            unit: self.unit,
            date: self.date.clone(),
        }
    }
}
