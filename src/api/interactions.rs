use std::sync::Arc;

use axum::{
    Extension,
    body::Bytes,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use thiserror::Error;

use crate::{
    discord::{SIGNATURE_HEADER, SignatureVerifier, TIMESTAMP_HEADER},
    info,
    job::{Dispatch, PlaylistRequest},
    types::{CommandRequest, CommandType, Interaction, InteractionCallbackType, InteractionResponse},
    warning,
};

/// Name of the slash command option holding the chart date.
pub const DATE_OPTION: &str = "date";

/// Reasons a webhook call is rejected before anything is dispatched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Invalid JSON")]
    InvalidJson,
    #[error("Bad request")]
    MissingHeaders,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invalid type")]
    InvalidType,
    #[error("Unknown command {0}")]
    UnknownCommand(String),
    #[error("Missing {0}")]
    MissingField(&'static str),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidSignature => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

pub struct GatewayState {
    pub verifier: SignatureVerifier,
    pub dispatcher: Arc<dyn Dispatch>,
    /// Slash command that starts a playlist job.
    pub command_name: String,
}

impl GatewayState {
    pub fn new(
        verifier: SignatureVerifier,
        dispatcher: Arc<dyn Dispatch>,
        command_name: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            dispatcher,
            command_name: command_name.into(),
        }
    }

    /// Turns an application command into a job request.
    fn playlist_request(&self, interaction: &Interaction) -> Result<PlaylistRequest, GatewayError> {
        let data = interaction
            .data
            .as_ref()
            .ok_or(GatewayError::MissingField("command data"))?;

        if data.name != self.command_name {
            warning!("Rejecting unknown command {}", data.name);
            return Err(GatewayError::UnknownCommand(data.name.clone()));
        }

        let options = data.option_map();
        let date = options
            .get(DATE_OPTION)
            .and_then(Value::as_str)
            .ok_or(GatewayError::MissingField("date option"))?;
        let interaction_token = interaction
            .token
            .as_deref()
            .ok_or(GatewayError::MissingField("interaction token"))?;

        Ok(PlaylistRequest {
            date: date.to_string(),
            interaction_token: interaction_token.to_string(),
        })
    }
}

/// Reads the JSON body and both signature headers.
///
/// The body is parsed before the headers are looked at, so a malformed body is
/// reported as such even when the headers are missing too.
pub fn parse_request(headers: &HeaderMap, body: &[u8]) -> Result<CommandRequest, GatewayError> {
    let interaction: Interaction =
        serde_json::from_slice(body).map_err(|_| GatewayError::InvalidJson)?;

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let (Some(signature), Some(timestamp)) = (header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER))
    else {
        return Err(GatewayError::MissingHeaders);
    };

    Ok(CommandRequest {
        raw_body: body.to_vec(),
        signature,
        timestamp,
        interaction,
    })
}

/// `POST /interactions`
///
/// - 400 for an unparsable body, missing signature headers, an unknown
///   interaction type, an unknown command or a command without date
/// - 401 when the signature does not match
/// - `{"type":1}` for pings
/// - `{"type":5}` once a playlist job has been dispatched
pub async fn interactions(
    Extension(state): Extension<Arc<GatewayState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, GatewayError> {
    let request = parse_request(&headers, &body)?;

    if !state
        .verifier
        .verify(&request.signature, &request.timestamp, &request.raw_body)
    {
        return Err(GatewayError::InvalidSignature);
    }

    match CommandType::try_from(request.interaction.kind) {
        Ok(CommandType::Ping) => Ok(Json(InteractionResponse {
            kind: InteractionCallbackType::Pong,
        })),
        Ok(CommandType::ApplicationCommand) => {
            let job = state.playlist_request(&request.interaction)?;
            info!("Received {} command for {}", state.command_name, job.date);
            // The job reports its own result; nobody waits for it here.
            drop(state.dispatcher.dispatch(job));
            Ok(Json(InteractionResponse {
                kind: InteractionCallbackType::DeferredChannelMessageWithSource,
            }))
        }
        Err(kind) => {
            warning!("Invalid interaction type {}", kind);
            Err(GatewayError::InvalidType)
        }
    }
}
