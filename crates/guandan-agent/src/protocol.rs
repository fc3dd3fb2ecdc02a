//! Line-delimited JSON exchanged with the table server.
//!
//! Each request is one JSON object on one line; each gets exactly one response line.
//! Malformed requests are answered with `{"error": "..."}` rather than failing the session.

use guandan_bot::bot::StrategyParams;
use guandan_bot::{Decision, HeuristicPolicy, Policy, PolicyContext};
use guandan_core::model::card::Card;
use guandan_core::model::error::CardError;
use guandan_core::model::hand::Hand;
use guandan_core::model::level::Level;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{Level as TraceLevel, event};

const DEFAULT_WIRE_LEVEL: i64 = 2;
/// Two decks are in play, so no card can be held more than twice.
const MAX_COPIES: usize = 2;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct RawRequest {
    msg: String,
    #[serde(default)]
    request_id: Option<Value>,
    #[serde(default)]
    level: Option<i64>,
    #[serde(default)]
    last_move: Vec<Card>,
    #[serde(default)]
    your_cards: Vec<Card>,
}

/// A validated request.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Ping,
    Decide(DecideRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecideRequest {
    pub request_id: Option<Value>,
    pub level: Level,
    pub last_move: Vec<Card>,
    pub hand: Hand,
}

impl Request {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let raw: RawRequest = serde_json::from_str(line)?;
        match raw.msg.as_str() {
            "ping" => Ok(Request::Ping),
            "ai_call" => {
                let level = Level::from_wire(raw.level.unwrap_or(DEFAULT_WIRE_LEVEL))?;
                check_copies(&raw.your_cards)?;
                Ok(Request::Decide(DecideRequest {
                    request_id: raw.request_id,
                    level,
                    last_move: raw.last_move,
                    hand: Hand::with_cards(raw.your_cards),
                }))
            }
            other => Err(ProtocolError::UnknownMessage(other.to_string())),
        }
    }
}

fn check_copies(cards: &[Card]) -> Result<(), ProtocolError> {
    let mut counts: HashMap<Card, usize> = HashMap::new();
    for &card in cards {
        let count = counts.entry(card).or_default();
        *count += 1;
        if *count > MAX_COPIES {
            return Err(ProtocolError::TooManyCopies(card));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Play {
        action: &'static str,
        cards: Vec<Card>,
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
    },
    Status {
        status: &'static str,
    },
    Error {
        error: String,
    },
}

impl Response {
    pub fn play(decision: &Decision, request_id: Option<Value>) -> Self {
        Response::Play {
            action: "play_cards",
            cards: decision.cards().to_vec(),
            request_id,
        }
    }

    pub fn healthy() -> Self {
        Response::Status { status: "healthy" }
    }

    pub fn error(err: &ProtocolError) -> Self {
        Response::Error {
            error: err.to_string(),
        }
    }

    pub fn to_line(&self) -> String {
        // A response only holds strings, cards and previously parsed JSON.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"error":"encoding failed"}"#.into())
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown msg '{0}'")]
    UnknownMessage(String),
    #[error("invalid level: {0}")]
    Level(#[from] CardError),
    #[error("card {0} appears more than twice")]
    TooManyCopies(Card),
}

/// Outcome of one request line, for the serve loop's bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub enum Handled {
    Decided { response: Response, decision: Decision },
    Other(Response),
}

impl Handled {
    pub fn response(&self) -> &Response {
        match self {
            Handled::Decided { response, .. } | Handled::Other(response) => response,
        }
    }
}

/// Answers one request line.
pub fn handle_line(line: &str, params: &StrategyParams) -> Handled {
    event!(target: "guandan_agent::protocol", TraceLevel::DEBUG, request = line, "received");
    let request = match Request::parse(line) {
        Ok(request) => request,
        Err(err) => {
            event!(
                target: "guandan_agent::protocol",
                TraceLevel::WARN,
                error = %err,
                "rejected request"
            );
            return Handled::Other(Response::error(&err));
        }
    };

    match request {
        Request::Ping => Handled::Other(Response::healthy()),
        Request::Decide(request) => {
            let ctx = PolicyContext {
                hand: &request.hand,
                last_play: &request.last_move,
                level: request.level,
                params,
            };
            let decision = HeuristicPolicy::new().decide(&ctx);
            let response = Response::play(&decision, request.request_id);
            Handled::Decided { response, decision }
        }
    }
}
