//! GraphQL transport
//!
//! Thin reqwest client over the `graphql_client` request/response envelope,
//! shared by the remote catalog and the remote authenticator.

use graphql_client::{QueryBody, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors from a GraphQL round trip
#[derive(Debug, thiserror::Error)]
pub enum GraphQlError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an `errors` array
    #[error("GraphQL error: {}", .0.join("; "))]
    Response(Vec<String>),

    /// Neither `data` nor `errors` was present
    #[error("GraphQL response carried no data")]
    MissingData,
}

impl GraphQlError {
    /// True when the server could not be reached or answered 5xx
    pub fn is_transport(&self) -> bool {
        match self {
            GraphQlError::Http(e) => {
                e.is_connect()
                    || e.is_timeout()
                    || e.status().map_or(false, |status| status.is_server_error())
            }
            _ => false,
        }
    }
}

/// Build a request body for a hand-written document.
pub fn operation<V>(operation_name: &'static str, query: &'static str, variables: V) -> QueryBody<V> {
    QueryBody {
        variables,
        query,
        operation_name,
    }
}

/// GraphQL endpoint plus optional service token.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Token sent when the caller has none of its own
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one operation and decode its `data` payload.
    ///
    /// `bearer` is the signed-in user's backend token; it takes precedence
    /// over the configured service token.
    pub async fn execute<V, T>(&self, body: &QueryBody<V>, bearer: Option<&str>) -> Result<T, GraphQlError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        tracing::debug!(operation = body.operation_name, "GraphQL request");

        let mut request = self.http.post(&self.endpoint).json(body);
        if let Some(token) = bearer.or(self.token.as_deref()) {
            request = request.bearer_auth(token);
        }

        let response: Response<T> = request.send().await?.error_for_status()?.json().await?;
        decode(response)
    }
}

fn decode<T>(response: Response<T>) -> Result<T, GraphQlError> {
    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors.into_iter().map(|e| e.message).collect();
        return Err(GraphQlError::Response(messages));
    }
    response.data.ok_or(GraphQlError::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Me {
        me: String,
    }

    #[test]
    fn test_decode_data() {
        let response: Response<Me> = serde_json::from_value(json!({ "data": { "me": "1" } })).unwrap();
        assert_eq!(decode(response).unwrap(), Me { me: "1".to_string() });
    }

    #[test]
    fn test_decode_errors_win_over_partial_data() {
        let response: Response<Me> = serde_json::from_value(json!({
            "data": null,
            "errors": [{ "message": "Unauthorized" }, { "message": "try again" }]
        }))
        .unwrap();
        let err = decode(response).unwrap_err();
        assert_eq!(err.to_string(), "GraphQL error: Unauthorized; try again");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_decode_missing_data() {
        let response: Response<Me> = serde_json::from_value(json!({ "errors": [] })).unwrap();
        assert!(matches!(decode(response), Err(GraphQlError::MissingData)));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(operation("Me", "query Me { me { id } }", json!({ "id": "3" }))).unwrap();
        assert_eq!(body["variables"]["id"], "3");
        assert_eq!(body["operationName"], "Me");
        assert!(body["query"].as_str().unwrap().starts_with("query"));
    }
}
