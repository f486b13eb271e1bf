//! Classification of raw server-sent frames into agent stream events.
//!
//! The wire kind comes from the SSE `event:` name when present, otherwise from
//! the single top-level key of the JSON payload:
//!
//! ```text
//! event: chunk                      data: {"chunk":{"bytes":"aGk="}}
//! data: {"bytes":"aGk="}
//! ```
//!
//! Classification is total. Frames that do not match a known kind, or whose
//! payload is malformed, become [`StreamEvent::Unclassified`].
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::client::RawEvent;

const KIND_CHUNK: &str = "chunk";
const KIND_FILES: &str = "files";
const KIND_RETURN_CONTROL: &str = "returnControl";

/// Literal appended for frames that could not be classified.
pub const UNCLASSIFIED_TEXT: &str = "error";

/// Semantic view of one agent stream frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    /// Fragment of model output text.
    TextChunk { text: String },
    /// Generated file artifact. Only the first file of a frame is kept.
    FileReference { name: String },
    /// Control handed back to the caller.
    ControlReturn { invocation_id: String },
    /// Any frame that matched none of the above.
    Unclassified,
}

impl StreamEvent {
    /// Short kind label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TextChunk { .. } => "text_chunk",
            Self::FileReference { .. } => "file_reference",
            Self::ControlReturn { .. } => "control_return",
            Self::Unclassified => "unclassified",
        }
    }

    /// Appends this event's textual contribution to `buf`.
    pub fn render_into(&self, buf: &mut String) {
        match self {
            Self::TextChunk { text } => buf.push_str(text),
            Self::FileReference { name } => {
                buf.push_str("file: ");
                buf.push_str(name);
            }
            Self::ControlReturn { invocation_id } => {
                buf.push_str("return control: ");
                buf.push_str(invocation_id);
            }
            Self::Unclassified => buf.push_str(UNCLASSIFIED_TEXT),
        }
    }

    /// Returns this event's textual contribution.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

/// Maps a raw frame to a [`StreamEvent`]. Never fails.
pub fn classify(raw: &RawEvent) -> StreamEvent {
    let Ok(value) = serde_json::from_str::<Value>(&raw.data) else {
        return StreamEvent::Unclassified;
    };
    let named = raw
        .event
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "message");

    let (kind, payload) = match named {
        Some(kind) => (kind, value.get(kind).unwrap_or(&value)),
        None => match single_entry(&value) {
            Some(entry) => entry,
            None => return StreamEvent::Unclassified,
        },
    };

    let event = match kind {
        KIND_CHUNK => text_chunk(payload),
        KIND_FILES => file_reference(payload),
        KIND_RETURN_CONTROL => control_return(payload),
        _ => None,
    };
    event.unwrap_or(StreamEvent::Unclassified)
}

fn single_entry(value: &Value) -> Option<(&str, &Value)> {
    let object = value.as_object()?;
    if object.len() != 1 {
        return None;
    }
    object.iter().next().map(|(k, v)| (k.as_str(), v))
}

fn text_chunk(payload: &Value) -> Option<StreamEvent> {
    let encoded = payload.get("bytes")?.as_str()?;
    let bytes = STANDARD.decode(encoded).ok()?;
    Some(StreamEvent::TextChunk {
        text: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

fn file_reference(payload: &Value) -> Option<StreamEvent> {
    let name = payload
        .get("files")?
        .as_array()?
        .first()?
        .get("name")?
        .as_str()?;
    Some(StreamEvent::FileReference {
        name: name.to_owned(),
    })
}

fn control_return(payload: &Value) -> Option<StreamEvent> {
    let invocation_id = payload.get("invocationId")?.as_str()?;
    Some(StreamEvent::ControlReturn {
        invocation_id: invocation_id.to_owned(),
    })
}
