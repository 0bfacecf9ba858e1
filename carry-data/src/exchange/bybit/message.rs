use crate::error::FetchError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Envelope wrapping every [`Bybit`](super::BybitRest) V5 REST response.
///
/// `result` is only parsed once `retCode` reports success, since error responses carry an
/// empty object in its place.
///
/// ### Raw Payload Examples
/// See docs: <https://bybit-exchange.github.io/docs/v5/error>
/// ```json
/// {
///     "retCode": 10001,
///     "retMsg": "Not supported symbols",
///     "result": {},
///     "retExtInfo": {},
///     "time": 1672025956592
/// }
/// ```
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct BybitResponse {
    #[serde(rename = "retCode")]
    pub code: i64,

    #[serde(rename = "retMsg", default)]
    pub message: String,

    #[serde(default)]
    pub result: serde_json::Value,
}

impl BybitResponse {
    /// Bybit success `retCode`.
    pub const CODE_OK: i64 = 0;

    /// Parse the `result` payload, or surface the exchange error code and message.
    pub fn into_result<T>(self) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        if self.code != Self::CODE_OK {
            return Err(FetchError::Exchange {
                code: self.code,
                message: self.message,
            });
        }

        serde_json::from_value(self.result).map_err(FetchError::from)
    }
}

/// `result` payload of list endpoints.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct BybitList<T> {
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub symbol: Option<String>,

    pub list: Vec<T>,
}
