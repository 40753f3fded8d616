use anyhow::Result;

use crate::config::Config;
use crate::envelope::{RequestEnvelope, RequestType};
use crate::gemini;
use crate::interceptor::RequestContext;
use crate::response::{ResponseBuilder, ResponseEnvelope};

/// Slot carrying the user's question on AskQuestionIntent.
const QUESTION_SLOT: &str = "question";

/// Question forwarded to the answer service when the slot arrives empty.
const DEFAULT_QUESTION: &str = "No question provided";

/// Spoken when the platform matched the utterance to nothing the skill knows.
const FALLBACK_MESSAGE: &str = "Sorry, I don't know about that. Please try again.";

/// Spoken for unhandled faults and request shapes nothing else claims.
const ERROR_MESSAGE: &str = "Sorry, I had trouble understanding your request. Please try again.";

/// The skill's request handlers, one variant per intent case.
///
/// Dispatch scans [`HANDLER_CHAIN`] in order and invokes the first variant
/// whose [`Handler::matches`] returns true. [`Handler::Error`] matches every
/// envelope, so the scan always produces a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Launch,
    AskQuestion,
    Help,
    CancelAndStop,
    Fallback,
    Error,
    /// Errors unconditionally in `handle`; lets tests reach the dispatch
    /// fault arm, which no shipping variant can trigger.
    #[cfg(test)]
    Failing,
}

/// Registration order. First match wins, so the catch-all stays last.
pub const HANDLER_CHAIN: [Handler; 6] = [
    Handler::Launch,
    Handler::AskQuestion,
    Handler::Help,
    Handler::CancelAndStop,
    Handler::Fallback,
    Handler::Error,
];

impl Handler {
    /// Predicate half of the dispatch protocol.
    pub fn matches(&self, envelope: &RequestEnvelope) -> bool {
        match self {
            Handler::Launch => envelope.request_type() == RequestType::LaunchRequest,
            Handler::AskQuestion => envelope.is_intent("AskQuestionIntent"),
            Handler::Help => envelope.is_intent("AMAZON.HelpIntent"),
            Handler::CancelAndStop => {
                envelope.is_intent("AMAZON.CancelIntent") || envelope.is_intent("AMAZON.StopIntent")
            }
            Handler::Fallback => envelope.is_intent("AMAZON.FallbackIntent"),
            Handler::Error => true,
            #[cfg(test)]
            Handler::Failing => false,
        }
    }

    /// Action half of the dispatch protocol. Only [`Handler::AskQuestion`]
    /// touches the network; the rest answer from the localized context.
    pub async fn handle(
        &self,
        client: &reqwest::Client,
        config: &Config,
        envelope: &RequestEnvelope,
        context: &RequestContext,
    ) -> Result<ResponseEnvelope> {
        let response = match self {
            Handler::Launch => {
                let text = context.t("WELCOME");
                ResponseBuilder::speak(text.clone()).reprompt(text).build()
            }
            Handler::AskQuestion => {
                let question = envelope
                    .slot_value(QUESTION_SLOT)
                    .filter(|value| !value.is_empty())
                    .unwrap_or(DEFAULT_QUESTION);
                let answer = gemini::ask(client, config, question).await;
                ResponseBuilder::speak(answer).build()
            }
            Handler::Help => {
                let text = context.t("HELP");
                ResponseBuilder::speak(text.clone()).reprompt(text).build()
            }
            Handler::CancelAndStop => ResponseBuilder::speak(context.t("GOODBYE")).build(),
            Handler::Fallback => ResponseBuilder::speak(FALLBACK_MESSAGE)
                .reprompt(FALLBACK_MESSAGE)
                .build(),
            Handler::Error => trouble_response(),
            #[cfg(test)]
            Handler::Failing => anyhow::bail!("handler exploded"),
        };

        Ok(response)
    }
}

/// The error handler's fixed response, also spoken by the dispatcher when a
/// handler or interceptor stage faults mid-flight.
pub fn trouble_response() -> ResponseEnvelope {
    ResponseBuilder::speak(ERROR_MESSAGE)
        .reprompt(ERROR_MESSAGE)
        .build()
}
