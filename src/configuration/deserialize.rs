pub mod seconds {
    use crate::time::timeunit::DurationUnit;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_derive::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Threshold {
        Seconds(f64),
        Unit(String),
    }

    /// Reads a threshold given either as plain seconds or as a unit string
    /// such as `250ms`, returning seconds.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Threshold::deserialize(deserializer)? {
            Threshold::Seconds(value) if value.is_finite() && value >= 0.0 => Ok(value),
            Threshold::Seconds(value) => Err(D::Error::custom(format!(
                "duration '{}' must be a non-negative number of seconds",
                value
            ))),
            Threshold::Unit(text) => text
                .parse::<DurationUnit>()
                .map(|unit| unit.as_secs_f64())
                .map_err(|err| D::Error::custom(err.to_string())),
        }
    }
}
