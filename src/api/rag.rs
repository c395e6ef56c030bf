use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::api::{ApiClient, ApiError, RequestOptions, Transport};
use crate::config::ASK_TIMEOUT;

/// Path of the question endpoint, resolved against the page origin.
pub const QUERY_PATH: &str = "/query";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    pub question: String,
}

/// Backend answer. Only the fields the views read are typed; everything
/// else is kept as-is in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AskResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_sources")]
    pub sources: Option<Vec<Source>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A citation attached to an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub title: Option<String>,
    pub url: Option<String>,
}

impl Source {
    fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            title: field("title"),
            url: field("url"),
        }
    }
}

/// Accept any JSON for a text field: strings verbatim, `null` as absent,
/// other values rendered as JSON text.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// A `sources` value that is not an array counts as no sources.
fn lenient_sources<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Source>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.iter().map(Source::from_value).collect()),
        _ => None,
    })
}

/// Send one question to the backend and return its decoded answer.
///
/// The caller trims and rejects empty questions before calling.
#[allow(clippy::future_not_send)]
pub async fn ask_question<T: Transport>(
    client: &ApiClient<T>,
    question: &str,
) -> Result<AskResponse, ApiError> {
    let request = AskRequest {
        question: question.to_string(),
    };
    let options = RequestOptions {
        base_url: Some(String::new()),
        timeout: Some(ASK_TIMEOUT),
    };
    client.post(QUERY_PATH, &request, &options).await
}
