use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::validation;

/// Inclusive `[min, max]` bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> ValueRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// True when `value` lies within the bounds (inclusive on both ends)
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// True when `min > max`; such a range contains nothing
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl<T: fmt::Display> fmt::Display for ValueRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Validated query input.
///
/// Only obtainable through validation, so every range is ordered and
/// inside its domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    weight: ValueRange<f64>,
    rating: ValueRange<f64>,
    playtime: ValueRange<u32>,
    players: ValueRange<u32>,
}

impl FilterCriteria {
    /// Build criteria from typed ranges, applying the same checks as raw input
    pub fn from_ranges(
        weight: (f64, f64),
        rating: (f64, f64),
        playtime: (u32, u32),
        players: (u32, u32),
    ) -> Result<Self> {
        let weight = ValueRange::new(weight.0, weight.1);
        let rating = ValueRange::new(rating.0, rating.1);
        let playtime = ValueRange::new(playtime.0, playtime.1);
        let players = ValueRange::new(players.0, players.1);

        validation::check_weight(&weight)?;
        validation::check_rating(&rating)?;
        validation::check_playtime(&playtime)?;
        validation::check_players(&players)?;

        Ok(Self::from_checked(weight, rating, playtime, players))
    }

    /// Widest criteria validation accepts
    pub fn wide_open() -> Self {
        Self::from_checked(
            validation::WEIGHT_DOMAIN,
            validation::RATING_DOMAIN,
            ValueRange::new(0, u32::MAX),
            ValueRange::new(1, validation::MAX_PLAYER_COUNT),
        )
    }

    pub(crate) fn from_checked(
        weight: ValueRange<f64>,
        rating: ValueRange<f64>,
        playtime: ValueRange<u32>,
        players: ValueRange<u32>,
    ) -> Self {
        Self {
            weight,
            rating,
            playtime,
            players,
        }
    }

    pub fn weight(&self) -> ValueRange<f64> {
        self.weight
    }

    pub fn rating(&self) -> ValueRange<f64> {
        self.rating
    }

    pub fn playtime(&self) -> ValueRange<u32> {
        self.playtime
    }

    pub fn players(&self) -> ValueRange<u32> {
        self.players
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "weight {} rating {} playtime {} players {}",
            self.weight, self.rating, self.playtime, self.players
        )
    }
}
