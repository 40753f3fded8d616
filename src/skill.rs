use std::sync::Arc;

use anyhow::Result;
use tracing::{error, warn};

use crate::config::Config;
use crate::envelope::RequestEnvelope;
use crate::gemini;
use crate::handlers::{self, Handler, HANDLER_CHAIN};
use crate::interceptor::{InterceptorChain, RequestContext, RequestInterceptor};
use crate::response::ResponseEnvelope;

/// The assembled skill: configuration, the shared HTTP client, and the
/// interceptor chain, wired once at startup and shared across requests.
pub struct Skill {
    config: Arc<Config>,
    client: reqwest::Client,
    interceptors: InterceptorChain,
}

impl Skill {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = gemini::http_client(&config)?;
        Ok(Self {
            config,
            client,
            interceptors: InterceptorChain::new(),
        })
    }

    /// Add an interceptor stage after the standard ones.
    pub fn register_interceptor(&mut self, stage: Box<dyn RequestInterceptor>) {
        self.interceptors.register(stage);
    }

    /// Handle one envelope end to end: run the interceptor chain, then scan
    /// the handler chain and invoke the first match. Always returns a
    /// well-formed response; a fault anywhere in the pipeline degrades to
    /// the spoken trouble message, never to a transport error.
    pub async fn process(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let context = match self.interceptors.run(envelope) {
            Ok(context) => context,
            Err(e) => {
                error!("Error handled: {}", e);
                return handlers::trouble_response();
            }
        };

        let Some(handler) = HANDLER_CHAIN.iter().find(|h| h.matches(envelope)) else {
            // Unreachable while the catch-all stays registered, but a missing
            // match must still speak rather than drop the request.
            warn!(
                "No handler matched request type {:?}",
                envelope.request_type()
            );
            return handlers::trouble_response();
        };

        self.run_handler(*handler, envelope, &context).await
    }

    /// Invoke one handler, degrading its failure to the trouble response.
    async fn run_handler(
        &self,
        handler: Handler,
        envelope: &RequestEnvelope,
        context: &RequestContext,
    ) -> ResponseEnvelope {
        match handler
            .handle(&self.client, &self.config, envelope, context)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Error handled: {}", e);
                handlers::trouble_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use proptest::prelude::*;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Helper Functions ====================

    fn create_test_config(endpoint: &str) -> Config {
        Config {
            port: 8080,
            gemini_endpoint: endpoint.to_string(),
            gemini_api_key: "test-gemini-key".to_string(),
            gemini_timeout_secs: 1,
        }
    }

    fn create_test_skill(endpoint: &str) -> Skill {
        Skill::new(Arc::new(create_test_config(endpoint))).expect("Should build skill")
    }

    fn envelope(json: serde_json::Value) -> RequestEnvelope {
        serde_json::from_value(json).expect("Should deserialize")
    }

    // ==================== Scenario Tests ====================

    #[tokio::test]
    async fn test_launch_in_french_greets_and_holds_session() {
        let skill = create_test_skill("http://localhost:1/api/ask");
        let envelope = envelope(serde_json::json!({
            "version": "1.0",
            "request": {"type": "LaunchRequest", "locale": "fr-FR"}
        }));

        let response = skill.process(&envelope).await;

        assert_eq!(
            response.speech_text(),
            "Bonjour, je suis Alex Alex. Vous pouvez me poser une question !"
        );
        assert_eq!(response.reprompt_text(), Some(response.speech_text()));
        assert!(!response.should_end_session());
    }

    #[tokio::test]
    async fn test_question_is_answered_and_session_ends() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/ask"))
            .and(header("Authorization", "Bearer test-gemini-key"))
            .and(body_json(serde_json::json!({"prompt": "What is 2+2?"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "4"})),
            )
            .mount(&mock_server)
            .await;

        let skill = create_test_skill(&format!("{}/api/ask", mock_server.uri()));
        let envelope = envelope(serde_json::json!({
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "locale": "en-US",
                "intent": {
                    "name": "AskQuestionIntent",
                    "slots": {"question": {"name": "question", "value": "What is 2+2?"}}
                }
            }
        }));

        let response = skill.process(&envelope).await;

        assert_eq!(response.speech_text(), "4");
        assert_eq!(response.reprompt_text(), None);
        assert!(response.should_end_session());
    }

    #[tokio::test]
    async fn test_upstream_failure_degrades_to_spoken_apology() {
        // Nothing is listening on this port
        let skill = create_test_skill("http://localhost:1/api/ask");
        let envelope = envelope(serde_json::json!({
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "locale": "en-US",
                "intent": {
                    "name": "AskQuestionIntent",
                    "slots": {"question": {"name": "question", "value": "What is 2+2?"}}
                }
            }
        }));

        let response = skill.process(&envelope).await;

        assert_eq!(response.speech_text(), "Sorry, I couldn't process your request.");
        assert_eq!(response.reprompt_text(), None);
        assert!(response.should_end_session());
    }

    #[tokio::test]
    async fn test_cancel_in_arabic_says_goodbye() {
        let skill = create_test_skill("http://localhost:1/api/ask");
        let envelope = envelope(serde_json::json!({
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "locale": "ar-SA",
                "intent": {"name": "AMAZON.CancelIntent"}
            }
        }));

        let response = skill.process(&envelope).await;

        assert_eq!(response.speech_text(), "مع السلامة!");
        assert_eq!(response.reprompt_text(), None);
        assert!(response.should_end_session());
    }

    #[tokio::test]
    async fn test_unknown_intent_speaks_trouble_message() {
        let skill = create_test_skill("http://localhost:1/api/ask");
        let envelope = envelope(serde_json::json!({
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "locale": "en-US",
                "intent": {"name": "UnknownIntent"}
            }
        }));

        let response = skill.process(&envelope).await;

        assert_eq!(
            response.speech_text(),
            "Sorry, I had trouble understanding your request. Please try again."
        );
        assert_eq!(response.reprompt_text(), Some(response.speech_text()));
        assert!(!response.should_end_session());
    }

    #[tokio::test]
    async fn test_session_ended_speaks_trouble_message() {
        let skill = create_test_skill("http://localhost:1/api/ask");
        let envelope = envelope(serde_json::json!({
            "version": "1.0",
            "request": {"type": "SessionEndedRequest", "reason": "USER_INITIATED"}
        }));

        let response = skill.process(&envelope).await;

        assert_eq!(
            response.speech_text(),
            "Sorry, I had trouble understanding your request. Please try again."
        );
    }

    #[tokio::test]
    async fn test_unmapped_locale_answers_in_english() {
        let skill = create_test_skill("http://localhost:1/api/ask");
        let envelope = envelope(serde_json::json!({
            "version": "1.0",
            "request": {"type": "LaunchRequest", "locale": "de-DE"}
        }));

        let response = skill.process(&envelope).await;

        assert_eq!(
            response.speech_text(),
            "Hi, I am Tecorb Alex. You can ask me anything!"
        );
    }

    #[tokio::test]
    async fn test_processing_is_stateless_across_requests() {
        let skill = create_test_skill("http://localhost:1/api/ask");
        let arabic = envelope(serde_json::json!({
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "locale": "ar-SA",
                "intent": {"name": "AMAZON.StopIntent"}
            }
        }));
        let english = envelope(serde_json::json!({
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "locale": "en-US",
                "intent": {"name": "AMAZON.StopIntent"}
            }
        }));

        // An earlier request's locale must not leak into the next one.
        assert_eq!(skill.process(&arabic).await.speech_text(), "مع السلامة!");
        assert_eq!(skill.process(&english).await.speech_text(), "Goodbye!");
        assert_eq!(skill.process(&arabic).await.speech_text(), "مع السلامة!");
    }

    // ==================== Interceptor Fault Tests ====================

    struct FailingStage;

    impl RequestInterceptor for FailingStage {
        fn process(&self, _envelope: &RequestEnvelope, _context: &mut RequestContext) -> Result<()> {
            bail!("stage exploded")
        }
    }

    #[tokio::test]
    async fn test_failing_interceptor_degrades_to_trouble_message() {
        let mut skill = create_test_skill("http://localhost:1/api/ask");
        skill.register_interceptor(Box::new(FailingStage));

        let envelope = envelope(serde_json::json!({
            "version": "1.0",
            "request": {"type": "LaunchRequest", "locale": "en-US"}
        }));

        let response = skill.process(&envelope).await;

        assert_eq!(
            response.speech_text(),
            "Sorry, I had trouble understanding your request. Please try again."
        );
    }

    // ==================== Handler Fault Tests ====================

    #[tokio::test]
    async fn test_failing_handler_degrades_to_trouble_message() {
        let skill = create_test_skill("http://localhost:1/api/ask");
        let envelope = envelope(serde_json::json!({
            "version": "1.0",
            "request": {"type": "LaunchRequest", "locale": "en-US"}
        }));
        let context = RequestContext::new();

        let response = skill.run_handler(Handler::Failing, &envelope, &context).await;

        assert_eq!(
            response.speech_text(),
            "Sorry, I had trouble understanding your request. Please try again."
        );
        assert_eq!(response.reprompt_text(), Some(response.speech_text()));
        assert!(!response.should_end_session());
    }

    // ==================== Dispatch Totality Tests ====================

    fn request_type_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("LaunchRequest".to_string()),
            Just("IntentRequest".to_string()),
            Just("SessionEndedRequest".to_string()),
            "[A-Za-z]{0,24}",
        ]
    }

    fn intent_name_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("AskQuestionIntent".to_string()),
            Just("AMAZON.HelpIntent".to_string()),
            Just("AMAZON.CancelIntent".to_string()),
            Just("AMAZON.StopIntent".to_string()),
            Just("AMAZON.FallbackIntent".to_string()),
            "[A-Za-z.]{0,24}",
        ]
    }

    proptest! {
        #[test]
        fn test_every_request_shape_gets_a_spoken_response(
            request_type in request_type_strategy(),
            intent_name in intent_name_strategy(),
            locale in "[a-z]{2}-[A-Z]{2}",
        ) {
            let response = tokio_test::block_on(async {
                let skill = create_test_skill("http://localhost:1/api/ask");
                let envelope = envelope(serde_json::json!({
                    "version": "1.0",
                    "request": {
                        "type": request_type,
                        "locale": locale,
                        "intent": {"name": intent_name}
                    }
                }));
                skill.process(&envelope).await
            });

            prop_assert!(!response.speech_text().is_empty());
        }
    }
}
