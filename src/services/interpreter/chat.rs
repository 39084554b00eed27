use super::{parse_route_intent, parse_stop_plan, IntentInterpreter, ParseError, RouteIntent};
use crate::config::InterpreterConfig;
use crate::models::{LocationIndex, StopPlan};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const ROUTE_SYSTEM_PROMPT: &str = "\
You extract trip endpoints from a traveller's request. Choose the start and, \
if the traveller mentions one, the destination from the known locations below. \
Also choose how stops should be prioritised: one of \"rating\", \"distance\" or \
\"cost\"; use \"rating\" when unsure.

Known locations (name: [latitude, longitude]):
{locations}

Reply with JSON only, start first:
{\"optimization\": \"rating\", \"locations\": {\"Start name\": [lat, lon], \"Destination name\": [lat, lon]}}";

const STOPS_SYSTEM_PROMPT: &str = "\
You plan the stops of a road trip. Route: {route}.
Decide how many stops the traveller wants and the kind of each stop, in travel \
order. Each category must be one of \"hotel\", \"restaurant\", \"entertainment\" \
or \"services\".

Reply with JSON only:
{\"number_of_stops\": 2, \"stops\": [{\"category\": \"restaurant\"}, {\"category\": \"hotel\"}]}";

/// How the client authenticates with the completions endpoint.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthMode {
    /// Azure-style deployments: `api-key` header plus `api-version` query param
    ApiKeyHeader,
    /// OpenAI-style: `Authorization: Bearer` header
    BearerHeader,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Interpreter backed by an OpenAI-compatible chat-completions deployment.
#[derive(Clone)]
pub struct ChatInterpreter {
    client: Client,
    config: InterpreterConfig,
    auth_mode: AuthMode,
}

impl ChatInterpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        let auth_mode = if config.api_version.is_some() {
            AuthMode::ApiKeyHeader
        } else {
            AuthMode::BearerHeader
        };
        ChatInterpreter {
            client: Client::new(),
            config,
            auth_mode,
        }
    }

    async fn complete(
        &self,
        system_prompt: String,
        user_prompt: &str,
    ) -> Result<String, ParseError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt.to_string(),
                },
            ],
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        match self.auth_mode {
            AuthMode::ApiKeyHeader => {
                request = request.header("api-key", &self.config.api_key);
                if let Some(version) = &self.config.api_version {
                    request = request.query(&[("api-version", version)]);
                }
            }
            AuthMode::BearerHeader => {
                request = request.bearer_auth(&self.config.api_key);
            }
        }

        tracing::debug!(model = %self.config.model, "Interpreter request");

        let response = request
            .send()
            .await
            .map_err(|e| ParseError::Transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                "Interpreter HTTP error {}: {}",
                status,
                error_text
            );
            let message = format!("HTTP {}: {}", status, error_text);
            return Err(ParseError::Transport(message));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ParseError::Malformed(format!("Unexpected completion body: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ParseError::Empty)
    }
}

fn locations_prompt(locations: &LocationIndex) -> String {
    let listed: Map<String, Value> = locations
        .iter()
        .map(|l| (l.name.clone(), json!([l.coordinates.lat, l.coordinates.lng])))
        .collect();
    ROUTE_SYSTEM_PROMPT.replace(
        "{locations}",
        &serde_json::to_string_pretty(&listed).unwrap_or_default(),
    )
}

fn stops_prompt(route: &RouteIntent) -> String {
    let names: Vec<&str> = route.endpoints.iter().map(|e| e.name.as_str()).collect();
    STOPS_SYSTEM_PROMPT.replace("{route}", &names.join(" -> "))
}

#[async_trait]
impl IntentInterpreter for ChatInterpreter {
    async fn interpret_route(
        &self,
        query: &str,
        locations: &LocationIndex,
    ) -> Result<RouteIntent, ParseError> {
        let raw = self.complete(locations_prompt(locations), query).await?;
        parse_route_intent(&raw, locations)
    }

    async fn interpret_stops(
        &self,
        query: &str,
        route: &RouteIntent,
    ) -> Result<StopPlan, ParseError> {
        let raw = self.complete(stops_prompt(route), query).await?;
        parse_stop_plan(&raw)
    }
}
