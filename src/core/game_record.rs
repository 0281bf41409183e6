use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Base URL for outbound BoardGameGeek links
pub const BGG_BOARDGAME_URL: &str = "https://boardgamegeek.com/boardgame";

/// Deserialize an identifier from string or int (catalog dumps use both)
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdValue {
        Int(i64),
        String(String),
    }

    Ok(match IdValue::deserialize(deserializer)? {
        IdValue::Int(i) => i.to_string(),
        IdValue::String(s) => s,
    })
}

/// Deserialize player counts from ints, numeric strings or null.
///
/// The upstream table stores `good_players` as a text array, so `["3", "4"]`
/// and `[3, 4]` are both accepted.
fn deserialize_player_counts<'de, D>(deserializer: D) -> Result<BTreeSet<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CountValue {
        Int(u32),
        String(String),
    }

    let values: Option<Vec<CountValue>> = Option::deserialize(deserializer)?;

    values
        .unwrap_or_default()
        .into_iter()
        .map(|value| match value {
            CountValue::Int(i) => Ok(i),
            CountValue::String(s) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::custom(format!("Invalid player count: {}", s))),
        })
        .collect()
}

/// Deserialize a nullable image path into an empty string when absent
fn deserialize_image_path<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    /// External identifier (BoardGameGeek id)
    #[serde(rename = "bgg_id", deserialize_with = "deserialize_id")]
    pub id: String,

    /// Display name
    #[serde(rename = "game")]
    pub name: String,

    /// Cover image URI, empty when absent
    #[serde(default, deserialize_with = "deserialize_image_path")]
    pub image_path: String,

    /// Complexity weight (1.0-5.0)
    #[serde(rename = "game_weight")]
    pub complexity_weight: f64,

    /// Average user rating (0.0-10.0)
    #[serde(rename = "avg_rating")]
    pub average_rating: f64,

    /// Manufacturer playtime in minutes
    #[serde(rename = "mfg_playtime", default)]
    pub manufacturer_playtime: Option<u32>,

    /// Player counts the game is considered good at
    #[serde(
        rename = "good_players",
        default,
        deserialize_with = "deserialize_player_counts"
    )]
    pub supported_player_counts: BTreeSet<u32>,
}

impl GameRecord {
    /// Create a new GameRecord with required fields
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        complexity_weight: f64,
        average_rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_path: String::new(),
            complexity_weight,
            average_rating,
            manufacturer_playtime: None,
            supported_player_counts: BTreeSet::new(),
        }
    }

    /// Set manufacturer playtime
    pub fn with_playtime(mut self, minutes: u32) -> Self {
        self.manufacturer_playtime = Some(minutes);
        self
    }

    /// Set supported player counts
    pub fn with_players(mut self, counts: impl IntoIterator<Item = u32>) -> Self {
        self.supported_player_counts = counts.into_iter().collect();
        self
    }

    /// Set image path
    pub fn with_image(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = image_path.into();
        self
    }

    /// Parse a catalog dump (JSON array of records)
    pub fn list_from_json(json: &str) -> serde_json::Result<Vec<Self>> {
        serde_json::from_str(json)
    }
}

/// Projection of a catalog entry returned to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultItem {
    #[serde(rename = "game")]
    pub name: String,

    pub image_path: String,

    #[serde(rename = "game_weight")]
    pub complexity_weight: f64,

    #[serde(rename = "avg_rating")]
    pub average_rating: f64,

    #[serde(rename = "mfg_playtime")]
    pub manufacturer_playtime: Option<u32>,

    #[serde(rename = "good_players")]
    pub supported_player_counts: Vec<u32>,

    #[serde(rename = "bgg_id")]
    pub id: String,
}

impl ResultItem {
    /// Outbound BoardGameGeek page for this game
    pub fn bgg_url(&self) -> String {
        format!("{}/{}", BGG_BOARDGAME_URL, urlencoding::encode(&self.id))
    }

    /// Human-readable player range, e.g. "3-5 players"
    pub fn player_summary(&self) -> String {
        match self.supported_player_counts.as_slice() {
            [] => "Unknown".to_string(),
            [only] => format!("{} players", only),
            [first, .., last] => format!("{}-{} players", first, last),
        }
    }

    /// Rating rounded to one decimal
    pub fn rating_display(&self) -> String {
        format_one_decimal(self.average_rating)
    }

    /// Complexity rounded to one decimal
    pub fn weight_display(&self) -> String {
        format_one_decimal(self.complexity_weight)
    }

    /// Playtime in minutes, "N/A" when unknown
    pub fn playtime_display(&self) -> String {
        match self.manufacturer_playtime {
            Some(minutes) => format!("{} min", minutes),
            None => "N/A".to_string(),
        }
    }
}

fn format_one_decimal(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}", value)
    } else {
        "N/A".to_string()
    }
}

impl From<GameRecord> for ResultItem {
    fn from(record: GameRecord) -> Self {
        Self {
            name: record.name,
            image_path: record.image_path,
            complexity_weight: record.complexity_weight,
            average_rating: record.average_rating,
            manufacturer_playtime: record.manufacturer_playtime,
            supported_player_counts: record.supported_player_counts.into_iter().collect(),
            id: record.id,
        }
    }
}
