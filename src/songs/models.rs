use serde::de::{Deserializer, Error as _};
use serde::Deserialize;

/// Body of a create request. Presence of `title` and `artist` is checked by
/// the manager, not by deserialization, so that a missing field is a
/// validation error rather than a malformed body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSong {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_year")]
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub duration: Option<String>,
}

/// Body of an update request. Fields that are present replace the stored
/// ones; an `id` in the body is dropped here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_year")]
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub duration: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearValue {
    Number(i32),
    Text(String),
}

/// Accepts `2020`, `"2020"` or null.
fn deserialize_optional_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YearValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YearValue::Number(year)) => Ok(Some(year)),
        Some(YearValue::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(YearValue::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid year: {:?}", text))),
    }
}
