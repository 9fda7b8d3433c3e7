//! Decoder for the Bot API response envelope `{ok, result}`.

use serde::{de::DeserializeOwned, Deserialize};

use crate::{errors::Error, Result};

#[derive(Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
}

/// Unwrap `raw` into the typed `result` payload.
///
/// `result` is only consulted when `ok` is true, so a rejected call never
/// fails on a payload of the wrong shape.
pub fn decode<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    let env: Envelope = serde_json::from_slice(raw).map_err(Error::Decoding)?;

    if !env.ok {
        return Err(Error::ServiceRejected {
            description: env.description,
        });
    }

    let result = env.result.ok_or_else(|| {
        Error::Decoding(<serde_json::Error as serde::de::Error>::missing_field(
            "result",
        ))
    })?;
    serde_json::from_value(result).map_err(Error::Decoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types::Update, ErrorKind};

    #[test]
    fn rejected_envelope_ignores_result() {
        for raw in [
            r#"{"ok": false}"#,
            r#"{"ok": false, "result": "not a list"}"#,
            r#"{"ok": false, "result": [{"update_id": 1}]}"#,
        ] {
            let err = decode::<Vec<Update>>(raw.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ServiceRejected, "{raw}");
        }
    }

    #[test]
    fn rejected_envelope_keeps_description_when_present() {
        let err = decode::<bool>(br#"{"ok":false,"error_code":400,"description":"Bad Request"}"#)
            .unwrap_err();
        match err {
            Error::ServiceRejected { description } => {
                assert_eq!(description.as_deref(), Some("Bad Request"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_decoding_error() {
        for raw in ["", "{", "not json", r#"{"result": []}"#, "[1,2]"] {
            let err = decode::<Vec<Update>>(raw.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Decoding, "{raw:?}");
        }
    }

    #[test]
    fn ok_without_result_is_decoding_error() {
        let err = decode::<Vec<Update>>(br#"{"ok": true}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn result_of_wrong_shape_is_decoding_error() {
        let err = decode::<Vec<Update>>(br#"{"ok": true, "result": {"id": 1}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn ok_envelope_yields_typed_result() {
        let updates: Vec<Update> =
            decode(br#"{"ok": true, "result": [{"update_id": 5}, {"update_id": 6}]}"#).unwrap();
        let ids: Vec<i64> = updates.iter().map(|u| u.update_id).collect();
        assert_eq!(ids, vec![5, 6]);

        let flag: bool = decode(br#"{"ok": true, "result": true}"#).unwrap();
        assert!(flag);
    }
}
