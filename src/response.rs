use serde::{Deserialize, Serialize};

/// Speech payload type for every reply this skill produces.
const SPEECH_TYPE: &str = "PlainText";

/// Envelope version pinned by the Alexa runtime.
const ENVELOPE_VERSION: &str = "1.0";

/// Top-level JSON reply understood by the Alexa runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: Response,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    /// Text the assistant will speak.
    pub fn speech_text(&self) -> &str {
        &self.response.output_speech.text
    }

    /// Reprompt text, when the session is being held open.
    pub fn reprompt_text(&self) -> Option<&str> {
        self.response
            .reprompt
            .as_ref()
            .map(|r| r.output_speech.text.as_str())
    }

    pub fn should_end_session(&self) -> bool {
        self.response.should_end_session
    }
}

/// Builds a [`ResponseEnvelope`] from spoken text plus an optional reprompt.
///
/// [`ResponseBuilder::speak`] is the only way in, so every response carries
/// exactly one speech payload. Adding a reprompt is what keeps the session
/// open: `shouldEndSession` is false when a reprompt is present and true
/// otherwise, never set independently.
///
/// ```
/// use alexa_gemini_webhook::response::ResponseBuilder;
///
/// let open = ResponseBuilder::speak("Hello").reprompt("Still there?").build();
/// assert!(!open.should_end_session());
///
/// let terminal = ResponseBuilder::speak("Goodbye!").build();
/// assert!(terminal.should_end_session());
/// ```
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    speech: String,
    reprompt: Option<String>,
}

impl ResponseBuilder {
    /// Start a response that speaks `text`.
    pub fn speak(text: impl Into<String>) -> Self {
        Self {
            speech: text.into(),
            reprompt: None,
        }
    }

    /// Attach a reprompt, holding the session open for another turn.
    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(text.into());
        self
    }

    pub fn build(self) -> ResponseEnvelope {
        let should_end_session = self.reprompt.is_none();
        ResponseEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            response: Response {
                output_speech: plain_speech(self.speech),
                reprompt: self.reprompt.map(|text| Reprompt {
                    output_speech: plain_speech(text),
                }),
                should_end_session,
            },
        }
    }
}

fn plain_speech(text: String) -> OutputSpeech {
    OutputSpeech {
        kind: SPEECH_TYPE.to_string(),
        text,
    }
}
