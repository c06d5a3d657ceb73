use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::InvokeErr;
use crate::params::BlobEncoding;

pub const UNKNOWN_BLOB: &str = "<unknown>";

/// Body the Functions host posts to a custom handler.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationRequest {
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Body a custom handler returns to the Functions host.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationResponse {
    pub outputs: Map<String, Value>,
    pub logs: Vec<String>,
    pub return_value: Option<Value>,
}

impl InvocationResponse {
    pub fn from_logs(logs: Vec<String>) -> Self {
        Self {
            logs,
            ..Default::default()
        }
    }
}

impl InvocationRequest {
    /// The blob's name from trigger metadata: `name` (the `{name}` path
    /// segment), then the full `BlobTrigger` path.
    pub fn blob_name(&self) -> &str {
        ["name", "BlobTrigger"]
            .iter()
            .find_map(|key| self.metadata.get(*key).and_then(Value::as_str))
            .unwrap_or(UNKNOWN_BLOB)
    }

    /// Raw blob content of the given input binding.
    pub fn blob_bytes(&self, binding: &str, encoding: BlobEncoding) -> Result<Cow<'_, [u8]>, InvokeErr> {
        match self.data.get(binding) {
            None | Some(Value::Null) => Err(InvokeErr::MissingBinding(binding.to_string())),
            Some(Value::String(text)) => match encoding {
                BlobEncoding::Text => Ok(Cow::Borrowed(text.as_bytes())),
                BlobEncoding::Base64 => Ok(Cow::Owned(STANDARD.decode(text)?)),
            },
            // The host already parsed the blob as JSON.
            Some(other) => Ok(Cow::Owned(serde_json::to_vec(other)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> InvocationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_blob_name_fallbacks() {
        let req = request(json!({"Data": {}, "Metadata": {"name": "one.json", "BlobTrigger": "data/one.json"}}));
        assert_eq!(req.blob_name(), "one.json");

        let req = request(json!({"Metadata": {"BlobTrigger": "data/one.json"}}));
        assert_eq!(req.blob_name(), "data/one.json");

        let req = request(json!({}));
        assert_eq!(req.blob_name(), UNKNOWN_BLOB);
    }

    #[test]
    fn test_blob_bytes() {
        let req = request(json!({"Data": {"inputBlob": "{\"id\":\"a1\"}"}}));
        assert_eq!(&*req.blob_bytes("inputBlob", BlobEncoding::Text).unwrap(), br#"{"id":"a1"}"#);

        let req = request(json!({"Data": {"inputBlob": "eyJpZCI6ImExIn0="}}));
        assert_eq!(&*req.blob_bytes("inputBlob", BlobEncoding::Base64).unwrap(), br#"{"id":"a1"}"#);

        let req = request(json!({"Data": {"inputBlob": {"id": "a1"}}}));
        assert_eq!(&*req.blob_bytes("inputBlob", BlobEncoding::Text).unwrap(), br#"{"id":"a1"}"#);

        let req = request(json!({"Data": {"other": "x"}}));
        assert!(matches!(
            req.blob_bytes("inputBlob", BlobEncoding::Text),
            Err(InvokeErr::MissingBinding(_))
        ));
    }

    #[test]
    fn test_response_shape() {
        let resp = InvocationResponse::from_logs(vec!["line".to_string()]);
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"Outputs": {}, "Logs": ["line"], "ReturnValue": null})
        );
    }
}
