//! Event search tool (`get_query_json`).
//!
//! Translates the call arguments into a `GET {base_url}/query.json?...`
//! request against the events API and returns the JSON response
//! pretty-printed. Responses that are not a JSON object are passed through
//! as raw text.

use reqwest::Url;
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::core::config::{ApiConfig, Config};
use crate::core::http_client::{HttpClient, HttpError, HttpRequest};
use crate::domains::tools::definitions::common::into_call_result;
use crate::domains::tools::{ToolError, ToolHandler};

/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "api-key";

/// Path of the search endpoint, relative to the base URL.
pub const QUERY_PATH: &str = "/query.json";

// ============================================================================
// Tool Parameters
// ============================================================================

/// A parameter value copied into the query string without coercion.
///
/// Strings are used verbatim; numbers and booleans use their JSON text,
/// except that integral floats below 1e21 drop the fraction (`10.0` becomes
/// `10`); arrays and objects are written as compact JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryValue(String);

impl QueryValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self(s),
            Value::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                    Self(format!("{:.0}", f))
                }
                _ => Self(n.to_string()),
            },
            other => Self(other.to_string()),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for QueryValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// Parameters for the event search. Every field is optional and unknown
/// keys are ignored.
///
/// A key set to `null` is dropped rather than sent as an empty value.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct QueryJsonParams {
    #[schemars(
        with = "Option<String>",
        description = "A displayable name for the specified place."
    )]
    pub name: Option<QueryValue>,

    #[schemars(
        with = "Option<String>",
        description = "The latitude of the specified place."
    )]
    pub latitude: Option<QueryValue>,

    #[schemars(
        with = "Option<String>",
        description = "The longitude of the specified place."
    )]
    pub longitude: Option<QueryValue>,

    #[schemars(
        with = "Option<f64>",
        description = "The elevation of the specified place, in meters."
    )]
    pub elevation: Option<QueryValue>,

    #[schemars(
        with = "Option<String>",
        description = "Along with ne, forms a bounded box using the longitude and latitude coordinates specified as the southwest corner. The search results are limited to the resulting box. Two float values, separated by a comma `latitude,longitude`. The ne parameter is required to use this parameter."
    )]
    pub sw: Option<QueryValue>,

    #[schemars(
        with = "Option<String>",
        description = "Search keywords to perform a text search on the fields: web_description, event_name and venue_name. 'AND' searches can be performed by wrapping query terms in quotes. If you do not specify a query, all results will be returned."
    )]
    pub query: Option<QueryValue>,

    #[schemars(
        with = "Option<String>",
        description = "Filters search results based on the facets provided. For more information on the values you can filter on, see Facets."
    )]
    pub filter: Option<QueryValue>,

    #[schemars(
        with = "Option<String>",
        description = "Start date to end date in the following format: YYYY-MM-DD:YYYY-MM-DD"
    )]
    pub date_range: Option<QueryValue>,

    #[schemars(
        with = "Option<f64>",
        description = "When facets is set to 1, a count of all facets will be included in the response."
    )]
    pub facets: Option<QueryValue>,

    #[schemars(
        with = "Option<String>",
        description = "Sorts results on the fields specified: `sort_value1+[asc|desc],sort_value2+[asc|desc],[...]`. You can sort on any facet or sortable response field. For spatial searches you can also sort by distance from the center: dist+[asc|desc]. Either +asc or +desc is required."
    )]
    pub sort: Option<QueryValue>,

    #[schemars(
        with = "Option<f64>",
        description = "Limits the number of results returned"
    )]
    pub limit: Option<QueryValue>,

    #[schemars(
        with = "Option<f64>",
        description = "Sets the starting point of the result set"
    )]
    pub offset: Option<QueryValue>,
}

impl QueryJsonParams {
    /// Decode raw call arguments. Anything but a JSON object is rejected.
    pub fn from_arguments(arguments: Value) -> Result<Self, ToolError> {
        match arguments {
            Value::Object(map) => serde_json::from_value(Value::Object(map))
                .map_err(|e| ToolError::invalid_arguments(e.to_string())),
            other => Err(ToolError::invalid_arguments(format!(
                "expected an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parameters in the order they are written to the query string.
    fn fields(&self) -> [(&'static str, Option<&QueryValue>); 12] {
        [
            ("name", self.name.as_ref()),
            ("latitude", self.latitude.as_ref()),
            ("longitude", self.longitude.as_ref()),
            ("elevation", self.elevation.as_ref()),
            ("sw", self.sw.as_ref()),
            ("query", self.query.as_ref()),
            ("filter", self.filter.as_ref()),
            ("date_range", self.date_range.as_ref()),
            ("facets", self.facets.as_ref()),
            ("sort", self.sort.as_ref()),
            ("limit", self.limit.as_ref()),
            ("offset", self.offset.as_ref()),
        ]
    }

    /// Number of parameters that were supplied.
    pub fn present_count(&self) -> usize {
        self.fields().iter().filter(|(_, v)| v.is_some()).count()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Request / Response Translation
// ============================================================================

/// Build the query string for a search, including the leading `?`.
///
/// Returns an empty string when no parameter is present and `api_key` is
/// empty. The key, when set, is always the last fragment.
pub fn build_query_string(params: &QueryJsonParams, api_key: &str) -> String {
    let mut fragments: Vec<String> = params
        .fields()
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, v)))
        .collect();

    if !api_key.is_empty() {
        fragments.push(format!("{}={}", API_KEY_PARAM, api_key));
    }

    if fragments.is_empty() {
        String::new()
    } else {
        format!("?{}", fragments.join("&"))
    }
}

/// Build the full request URL for a query string.
pub fn build_url(base_url: &str, query_string: &str) -> Result<Url, ToolError> {
    let raw = format!("{}{}{}", base_url, QUERY_PATH, query_string);
    Url::parse(&raw).map_err(|e| ToolError::RequestConstructionFailed(format!("{}: {}", e, base_url)))
}

/// Render a successful response body.
///
/// A JSON object is re-serialized with two-space indentation; anything else
/// is returned as-is.
pub fn format_response(body: &[u8]) -> Result<String, ToolError> {
    match serde_json::from_slice::<Map<String, Value>>(body) {
        Ok(object) => serde_json::to_string_pretty(&object)
            .map_err(|e| ToolError::JsonFormatFailed(e.to_string())),
        Err(e) => {
            debug!("Response is not a JSON object ({}), returning raw text", e);
            Ok(String::from_utf8_lossy(body).into_owned())
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Event search tool backed by the remote `query.json` endpoint.
pub struct QueryJsonTool {
    api: ApiConfig,
    client: Arc<dyn HttpClient>,
}

impl QueryJsonTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_query_json";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search event listings by place, keywords, facets and date range. \
         Supports spatial filtering, sorting and limit/offset paging. \
         Returns the API's JSON response pretty-printed.";

    pub fn new(config: &Config, client: Arc<dyn HttpClient>) -> Self {
        Self {
            api: config.api.clone(),
            client,
        }
    }

    /// Run a search and return the rendered response text.
    #[instrument(skip_all, fields(tool = "get_query_json"))]
    pub async fn execute(&self, params: &QueryJsonParams) -> Result<String, ToolError> {
        info!("Event search called with {} parameter(s)", params.present_count());

        let query_string = build_query_string(params, &self.api.api_key);
        let url = build_url(&self.api.base_url, &query_string)?;
        debug!(
            "GET {}{}{}",
            self.api.base_url,
            QUERY_PATH,
            build_query_string(params, "")
        );

        let request = HttpRequest::get(url).header("Accept", "application/json");
        let response = self.client.send(request).await.map_err(|e| match e {
            HttpError::Send(msg) => ToolError::RequestFailed(msg),
            HttpError::Body(msg) => ToolError::BodyReadFailed(msg),
        })?;

        if response.is_error() {
            debug!("Events API returned status {}", response.status);
            return Err(ToolError::ApiError(response.text()));
        }

        format_response(&response.body)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<QueryJsonParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for QueryJsonTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn to_tool(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        let outcome = match QueryJsonParams::from_arguments(arguments) {
            Ok(params) => self.execute(&params).await,
            Err(e) => Err(e),
        };
        into_call_result(outcome)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http_client::HttpResponse;
    use async_trait::async_trait;
    use rmcp::model::RawContent;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE_URL: &str = "https://api.example.com/svc/events/v2";

    enum Reply {
        Response(u16, &'static str),
        SendError,
        BodyError,
    }

    struct MockHttpClient {
        reply: Reply,
        calls: AtomicUsize,
        last_request: Mutex<Option<HttpRequest>>,
    }

    impl MockHttpClient {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            match self.reply {
                Reply::Response(status, body) => Ok(HttpResponse::new(status, body)),
                Reply::SendError => Err(HttpError::Send("connection refused".to_string())),
                Reply::BodyError => Err(HttpError::Body("unexpected EOF".to_string())),
            }
        }
    }

    fn tool_with(base_url: &str, api_key: &str, client: Arc<MockHttpClient>) -> QueryJsonTool {
        let config = Config::with_api(ApiConfig::new(base_url, api_key));
        QueryJsonTool::new(&config, client)
    }

    fn params(arguments: Value) -> QueryJsonParams {
        QueryJsonParams::from_arguments(arguments).unwrap()
    }

    fn result_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_query_string_follows_fixed_order() {
        let p = params(json!({
            "offset": 20,
            "limit": 10,
            "sort": "dist+asc",
            "facets": 1,
            "date_range": "2024-01-01:2024-01-31",
            "filter": "free:true",
            "query": "jazz",
            "sw": "40.7,-74.0",
            "elevation": 12.5,
            "longitude": "-73.98",
            "latitude": "40.75",
            "name": "Midtown"
        }));

        assert_eq!(
            build_query_string(&p, "secret"),
            "?name=Midtown&latitude=40.75&longitude=-73.98&elevation=12.5&sw=40.7,-74.0\
             &query=jazz&filter=free:true&date_range=2024-01-01:2024-01-31&facets=1\
             &sort=dist+asc&limit=10&offset=20&api-key=secret"
        );
    }

    #[test]
    fn test_query_string_skips_absent_parameters() {
        let p = params(json!({ "limit": 5, "query": "opera" }));
        assert_eq!(build_query_string(&p, ""), "?query=opera&limit=5");
        assert_eq!(build_query_string(&p, "k"), "?query=opera&limit=5&api-key=k");
    }

    #[test]
    fn test_query_string_empty_without_fragments() {
        let p = QueryJsonParams::default();
        assert_eq!(build_query_string(&p, ""), "");
        assert_eq!(build_query_string(&p, "k"), "?api-key=k");
    }

    #[test]
    fn test_empty_api_key_never_appended() {
        let p = params(json!({ "name": "x", "offset": 0 }));
        let query = build_query_string(&p, "");
        assert!(!query.contains("api-key"));
    }

    #[test]
    fn test_integral_floats_written_as_integers() {
        let p = params(json!({ "limit": 10.0, "offset": 0.0 }));
        assert_eq!(build_query_string(&p, ""), "?limit=10&offset=0");

        let p = params(json!({ "elevation": 12.5, "facets": 1.0, "limit": -3.0 }));
        assert_eq!(
            build_query_string(&p, ""),
            "?elevation=12.5&facets=1&limit=-3"
        );

        let p = params(json!({ "elevation": 1e21 }));
        assert!(!build_query_string(&p, "").contains("000000000000000000000"));
    }

    #[test]
    fn test_values_are_passed_through_leniently() {
        let p = params(json!({
            "limit": "ten",
            "latitude": 40.75,
            "facets": true,
            "unknown": "dropped",
            "offset": null
        }));
        assert_eq!(
            build_query_string(&p, ""),
            "?latitude=40.75&facets=true&limit=ten"
        );
        assert_eq!(p.present_count(), 3);
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        for args in [json!(null), json!([1, 2]), json!("name=x"), json!(3)] {
            let err = QueryJsonParams::from_arguments(args).unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments(_)));
        }
    }

    #[test]
    fn test_build_url() {
        let url = build_url(BASE_URL, "?query=jazz&limit=5").unwrap();
        assert_eq!(url.path(), "/svc/events/v2/query.json");
        assert_eq!(url.query(), Some("query=jazz&limit=5"));

        let bare = build_url(BASE_URL, "").unwrap();
        assert_eq!(bare.query(), None);
    }

    #[test]
    fn test_build_url_rejects_malformed_base() {
        let err = build_url("not a url", "").unwrap_err();
        assert!(matches!(err, ToolError::RequestConstructionFailed(_)));
    }

    #[test]
    fn test_format_response_pretty_prints_objects() {
        let text = format_response(br#"{"event_name":"Jazz Night"}"#).unwrap();
        assert_eq!(text, "{\n  \"event_name\": \"Jazz Night\"\n}");
    }

    #[test]
    fn test_format_response_falls_back_to_raw_text() {
        assert_eq!(format_response(b"plain text").unwrap(), "plain text");
        // Only objects are reformatted.
        assert_eq!(format_response(b"[1,2]").unwrap(), "[1,2]");
    }

    #[test]
    fn test_format_response_preserves_structure() {
        let body = br#"{"num_results":2,"results":[{"event_id":1,"free":true},{"event_id":2,"recur_days":["mon"]}],"status":"OK"}"#;
        let pretty = format_response(body).unwrap();
        let original: Value = serde_json::from_slice(body).unwrap();
        let reparsed: Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(original, reparsed);
    }

    #[tokio::test]
    async fn test_call_success_returns_pretty_json() {
        let client = MockHttpClient::new(Reply::Response(200, r#"{"event_name":"Jazz Night"}"#));
        let tool = tool_with(BASE_URL, "secret", client.clone());

        let result = tool.call(json!({ "query": "jazz", "limit": 5 })).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "{\n  \"event_name\": \"Jazz Night\"\n}");
        assert_eq!(client.calls(), 1);

        let request = client.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.example.com/svc/events/v2/query.json?query=jazz&limit=5&api-key=secret"
        );
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_call_api_error_embeds_body() {
        let client = MockHttpClient::new(Reply::Response(404, "not found"));
        let tool = tool_with(BASE_URL, "", client.clone());

        let result = tool.call(json!({})).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("not found"));
        assert!(result_text(&result).starts_with("API error"));
    }

    #[tokio::test]
    async fn test_call_non_json_body_is_not_an_error() {
        let client = MockHttpClient::new(Reply::Response(200, "plain text"));
        let tool = tool_with(BASE_URL, "", client);

        let result = tool.call(json!({ "name": "x" })).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "plain text");
    }

    #[tokio::test]
    async fn test_call_invalid_arguments_skips_network() {
        let client = MockHttpClient::new(Reply::Response(200, "{}"));
        let tool = tool_with(BASE_URL, "", client.clone());

        let result = tool.call(json!(["query", "jazz"])).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Invalid arguments"));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_call_malformed_base_url_skips_network() {
        let client = MockHttpClient::new(Reply::Response(200, "{}"));
        let tool = tool_with("::not-a-url::", "", client.clone());

        let result = tool.call(json!({})).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Failed to create request"));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_call_transport_failures_are_error_results() {
        let tool = tool_with(BASE_URL, "", MockHttpClient::new(Reply::SendError));
        let result = tool.call(json!({})).await;
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Request failed: connection refused"));

        let tool = tool_with(BASE_URL, "", MockHttpClient::new(Reply::BodyError));
        let result = tool.call(json!({})).await;
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Failed to read response body"));
    }

    #[tokio::test]
    async fn test_api_key_not_leaked_into_error_text() {
        let client = MockHttpClient::new(Reply::Response(500, "internal"));
        let tool = tool_with(BASE_URL, "secret", client);

        let result = tool.call(json!({})).await;
        assert!(!result_text(&result).contains("secret"));
    }

    #[tokio::test]
    async fn test_call_against_live_server() {
        use crate::core::http_client::ReqwestHttpClient;
        use mockito::Matcher;

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/query.json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "jazz".into()),
                Matcher::UrlEncoded("facets".into(), "1".into()),
                Matcher::UrlEncoded("api-key".into(), "secret".into()),
            ]))
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(r#"{"num_results":1,"results":[{"event_name":"Jazz Night"}]}"#)
            .create_async()
            .await;

        let config = Config::with_api(ApiConfig::new(server.url(), "secret"));
        let tool = QueryJsonTool::new(&config, Arc::new(ReqwestHttpClient::new()));
        let result = tool.call(json!({ "query": "jazz", "facets": 1 })).await;

        mock.assert_async().await;
        assert_eq!(result.is_error, Some(false));
        let reparsed: Value = serde_json::from_str(result_text(&result)).unwrap();
        assert_eq!(reparsed["results"][0]["event_name"], "Jazz Night");
    }

    #[test]
    fn test_tool_schema_lists_all_optional_parameters() {
        let tool = QueryJsonTool::to_tool();
        assert_eq!(tool.name, QueryJsonTool::NAME);

        let properties = tool
            .input_schema
            .get("properties")
            .and_then(|p| p.as_object())
            .unwrap();
        assert_eq!(properties.len(), 12);
        for key in ["name", "elevation", "sw", "date_range", "facets", "offset"] {
            assert!(properties.contains_key(key), "missing {}", key);
        }

        let required = tool
            .input_schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.len())
            .unwrap_or(0);
        assert_eq!(required, 0);
    }
}
