//! # Mount Payload
//!
//! What the host hands over when the ranker is mounted. Two shapes are
//! accepted:
//!
//! ```text
//! {"component_type": "audio", "items": [ ... ]}   // discriminator + items
//! [ ... ]                                         // items only
//! ```
//!
//! With the bare form, the component type comes from config / CLI. A missing
//! or `null` item list is a valid, empty ranking.

use log::info;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::ComponentType;
use crate::core::sequence::Sequence;
use crate::host::HostError;

#[derive(Debug, Clone)]
pub struct Payload {
    pub component_type: ComponentType,
    pub items: Sequence,
}

/// Parse a payload. `fallback` is used when the payload names no type.
pub fn parse_payload(value: Value, fallback: ComponentType) -> Result<Payload, HostError> {
    match value {
        Value::Object(mut map) => {
            let component_type = match map.remove("component_type") {
                None | Some(Value::Null) => fallback,
                Some(Value::String(s)) => {
                    ComponentType::parse(&s).ok_or(HostError::UnknownComponentType(s))?
                }
                Some(other) => return Err(HostError::UnknownComponentType(other.to_string())),
            };
            let items: Sequence =
                serde_json::from_value(map.remove("items").unwrap_or(Value::Null))?;
            Ok(Payload {
                component_type,
                items,
            })
        }
        other => Ok(Payload {
            component_type: fallback,
            items: serde_json::from_value(other)?,
        }),
    }
}

pub fn read_payload<R: Read>(reader: R, fallback: ComponentType) -> Result<Payload, HostError> {
    let value: Value = serde_json::from_reader(reader)?;
    parse_payload(value, fallback)
}

/// Load the payload from `path`, or from stdin when no path is given.
pub fn load_payload(path: Option<&Path>, fallback: ComponentType) -> Result<Payload, HostError> {
    let payload = match path {
        Some(path) => read_payload(BufReader::new(File::open(path)?), fallback)?,
        None => read_payload(std::io::stdin().lock(), fallback)?,
    };
    info!(
        "Loaded {} {} items from {}",
        payload.items.len(),
        payload.component_type,
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdin".to_string())
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_payload() {
        let payload = parse_payload(
            json!({"component_type": "audio", "items": [{"id": "baseline"}, {"id": "song_1"}]}),
            ComponentType::Youtube,
        )
        .unwrap();
        assert_eq!(payload.component_type, ComponentType::Audio);
        assert_eq!(payload.items.len(), 2);
    }

    #[test]
    fn test_bare_array_uses_fallback() {
        let payload =
            parse_payload(json!([{"id": "v1", "title": "Clip"}]), ComponentType::Youtube).unwrap();
        assert_eq!(payload.component_type, ComponentType::Youtube);
        assert_eq!(payload.items.len(), 1);
    }

    #[test]
    fn test_missing_or_null_items_is_empty() {
        let missing = parse_payload(json!({"component_type": "youtube"}), ComponentType::Audio);
        assert!(missing.unwrap().items.is_empty());
        let null = parse_payload(json!({"items": null}), ComponentType::Audio).unwrap();
        assert!(null.items.is_empty());
        assert_eq!(null.component_type, ComponentType::Audio);
    }

    #[test]
    fn test_unknown_component_type() {
        let err = parse_payload(json!({"component_type": "vinyl", "items": []}), ComponentType::Audio)
            .unwrap_err();
        assert!(matches!(err, HostError::UnknownComponentType(ref t) if t == "vinyl"));
        assert_eq!(err.to_string(), "Unknown component type: vinyl");
    }

    #[test]
    fn test_read_payload_from_reader() {
        let raw = br#"[{"id": 1}, {"id": 2}]"#;
        let payload = read_payload(&raw[..], ComponentType::Audio).unwrap();
        assert_eq!(payload.items.ids().len(), 2);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let raw = b"{not json";
        assert!(matches!(
            read_payload(&raw[..], ComponentType::Audio),
            Err(HostError::Json(_))
        ));
    }
}
