use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_ALBUM: &str = "";
pub const DEFAULT_GENRE: &str = "Unknown";
pub const DEFAULT_DURATION: &str = "0:00";

/// A single song record, as persisted and as served over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    #[serde(default = "default_album")]
    pub album: String,
    /// Records written without a year read back as 0. Older files may hold
    /// the year as a string.
    #[serde(default, deserialize_with = "deserialize_stored_year")]
    pub year: i32,
    #[serde(default = "default_genre")]
    pub genre: String,
    /// Free-form, e.g. "3:45". Not validated.
    #[serde(default = "default_duration")]
    pub duration: String,
}

/// Never fails: one odd year must not make the whole file unreadable.
fn deserialize_stored_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let year = match &value {
        Value::Null => Some(0),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
            .and_then(|year| i32::try_from(year).ok()),
        Value::String(text) if text.trim().is_empty() => Some(0),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(year.unwrap_or_else(|| {
        warn!("Unreadable stored year {}, using 0", value);
        0
    }))
}

fn default_album() -> String {
    DEFAULT_ALBUM.to_string()
}

fn default_genre() -> String {
    DEFAULT_GENRE.to_string()
}

fn default_duration() -> String {
    DEFAULT_DURATION.to_string()
}
