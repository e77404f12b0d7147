use crate::time::error::Error;
use core::str::FromStr;
use lazy_static::*;
use regex::Regex;

lazy_static! {
    static ref DURATION_REGEX: Regex = Regex::new(
        r"^\s*(?P<value>\d+(?:\.\d+)?)\s*(?P<unit>ns|us|ms|s|m|h|d)?\s*$"
    )
    .expect("Regex compilation error");
}

/// A threshold as written in configuration. A bare number is seconds.
#[derive(Debug, PartialEq)]
pub struct DurationUnit {
    value: f64,
    unit: TimeUnit,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TimeUnit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    fn seconds(self) -> f64 {
        match self {
            TimeUnit::Nanosecond => 1e-9,
            TimeUnit::Microsecond => 1e-6,
            TimeUnit::Millisecond => 1e-3,
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 60.0 * 60.0,
            TimeUnit::Day => 60.0 * 60.0 * 24.0,
        }
    }
}

impl DurationUnit {
    pub fn as_secs_f64(&self) -> f64 {
        self.value * self.unit.seconds()
    }
}

impl FromStr for DurationUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with('-') {
            return Err(Error::NegativeValue(s.to_owned()));
        }
        let caps = DURATION_REGEX
            .captures(s)
            .ok_or_else(|| Error::Syntax(s.to_owned()))?;
        let value = caps["value"]
            .parse::<f64>()
            .map_err(|_| Error::Syntax(s.to_owned()))?;
        let unit = match caps.name("unit") {
            Some(unit) => unit.as_str().parse::<TimeUnit>()?,
            None => TimeUnit::Second,
        };
        Ok(Self { value, unit })
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ns" | "nanosecond" | "nanos" | "nanoseconds" => Ok(TimeUnit::Nanosecond),
            "us" | "microsecond" | "micros" | "microseconds" => Ok(TimeUnit::Microsecond),
            "ms" | "millisecond" | "millis" | "milliseconds" => Ok(TimeUnit::Millisecond),
            "s" | "second" | "secs" | "seconds" => Ok(TimeUnit::Second),
            "m" | "minute" | "mins" | "minutes" => Ok(TimeUnit::Minute),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hour),
            "d" | "day" | "days" => Ok(TimeUnit::Day),
            _ => Err(Error::UnitNotSupported(s.to_owned())),
        }
    }
}
