//! Data attached to a strip while it is being dragged.

use serde::{Deserialize, Deserializer, Serialize};

use super::event::EventId;

/// Drag-start payload, serialized as JSON text:
/// `{"eventId": 12, "duration": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    #[serde(deserialize_with = "event_id_from_number_or_string")]
    pub event_id: EventId,
    /// Length of the dragged event in days.
    pub duration: u32,
}

impl DragPayload {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse drop data. Anything that is not a payload for a real event of
    /// at least one day is malformed.
    pub fn parse(text: &str) -> Result<Self, String> {
        let payload: DragPayload = serde_json::from_str(text).map_err(|err| err.to_string())?;
        if payload.duration == 0 {
            return Err("duration must be at least one day".to_string());
        }
        Ok(payload)
    }
}

/// Ids travel as numbers, but string ids such as `"12"` are accepted too.
fn event_id_from_number_or_string<'de, D>(deserializer: D) -> Result<EventId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(EventId(id)),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map(EventId)
            .map_err(|_| serde::de::Error::custom(format!("invalid event id {:?}", text))),
    }
}
