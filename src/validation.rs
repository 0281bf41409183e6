//! Filter validation.
//!
//! Turns the eight loosely-typed request values into a [`FilterCriteria`],
//! naming the offending field on the first failure.

use serde::Deserialize;
use serde_json::Value;
use std::fmt::Display;

use crate::core::{FilterCriteria, ValueRange};
use crate::error::{QueryError, Result};

/// Accepted complexity weights
pub const WEIGHT_DOMAIN: ValueRange<f64> = ValueRange { min: 1.0, max: 5.0 };

/// Accepted average ratings
pub const RATING_DOMAIN: ValueRange<f64> = ValueRange { min: 0.0, max: 10.0 };

/// Upper bound on player counts; keeps the expanded player set small
pub const MAX_PLAYER_COUNT: u32 = 64;

/// Filter exactly as received from the transport layer.
///
/// Values may be JSON numbers or numeric strings; anything else fails
/// validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilter {
    #[serde(default)]
    pub weight_min: Option<Value>,
    #[serde(default)]
    pub weight_max: Option<Value>,
    #[serde(default)]
    pub rating_min: Option<Value>,
    #[serde(default)]
    pub rating_max: Option<Value>,
    #[serde(default)]
    pub playtime_min: Option<Value>,
    #[serde(default)]
    pub playtime_max: Option<Value>,
    #[serde(default)]
    pub players_min: Option<Value>,
    #[serde(default)]
    pub players_max: Option<Value>,
}

impl RawFilter {
    /// Validate and normalize into [`FilterCriteria`]
    pub fn validate(&self) -> Result<FilterCriteria> {
        let weight = ValueRange::new(
            parse_number("weight_min", self.weight_min.as_ref())?,
            parse_number("weight_max", self.weight_max.as_ref())?,
        );
        check_weight(&weight)?;

        let rating = ValueRange::new(
            parse_number("rating_min", self.rating_min.as_ref())?,
            parse_number("rating_max", self.rating_max.as_ref())?,
        );
        check_rating(&rating)?;

        let playtime = ValueRange::new(
            parse_whole("playtime_min", self.playtime_min.as_ref())?,
            parse_whole("playtime_max", self.playtime_max.as_ref())?,
        );
        check_playtime(&playtime)?;

        let players = ValueRange::new(
            parse_whole("players_min", self.players_min.as_ref())?,
            parse_whole("players_max", self.players_max.as_ref())?,
        );
        check_players(&players)?;

        Ok(FilterCriteria::from_checked(weight, rating, playtime, players))
    }
}

fn parse_number(field: &str, value: Option<&Value>) -> Result<f64> {
    let number = match value {
        None | Some(Value::Null) => {
            return Err(QueryError::validation(field, "is required"));
        }
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| QueryError::validation(field, "must be numeric"))?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            QueryError::validation(field, format!("must be numeric, got \"{}\"", s))
        })?,
        Some(other) => {
            return Err(QueryError::validation(
                field,
                format!("must be numeric, got {}", other),
            ));
        }
    };

    if !number.is_finite() {
        return Err(QueryError::validation(field, "must be a finite number"));
    }

    Ok(number)
}

fn parse_whole(field: &str, value: Option<&Value>) -> Result<u32> {
    let number = parse_number(field, value)?;

    if number.fract() != 0.0 {
        return Err(QueryError::validation(
            field,
            format!("must be a whole number, got {}", number),
        ));
    }
    if number < 0.0 {
        return Err(QueryError::validation(field, "must not be negative"));
    }
    if number > u32::MAX as f64 {
        return Err(QueryError::validation(field, "is too large"));
    }

    Ok(number as u32)
}

fn check_domain<T>(name: &str, range: &ValueRange<T>, domain: &ValueRange<T>) -> Result<()>
where
    T: PartialOrd + Copy + Display,
{
    for (suffix, value) in [("min", range.min), ("max", range.max)] {
        if !domain.contains(value) {
            return Err(QueryError::validation(
                format!("{}_{}", name, suffix),
                format!("must be between {} and {}, got {}", domain.min, domain.max, value),
            ));
        }
    }
    Ok(())
}

fn check_order<T>(name: &str, range: &ValueRange<T>) -> Result<()>
where
    T: PartialOrd + Copy + Display,
{
    if range.is_inverted() {
        return Err(QueryError::validation(
            format!("{}_min", name),
            format!(
                "must not exceed {}_max ({} > {})",
                name, range.min, range.max
            ),
        ));
    }
    Ok(())
}

pub(crate) fn check_weight(range: &ValueRange<f64>) -> Result<()> {
    check_domain("weight", range, &WEIGHT_DOMAIN)?;
    check_order("weight", range)
}

pub(crate) fn check_rating(range: &ValueRange<f64>) -> Result<()> {
    check_domain("rating", range, &RATING_DOMAIN)?;
    check_order("rating", range)
}

pub(crate) fn check_playtime(range: &ValueRange<u32>) -> Result<()> {
    check_order("playtime", range)
}

pub(crate) fn check_players(range: &ValueRange<u32>) -> Result<()> {
    check_domain("players", range, &ValueRange::new(1, MAX_PLAYER_COUNT))?;
    check_order("players", range)
}
