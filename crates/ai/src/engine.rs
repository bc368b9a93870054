//! Analysis orchestration.
//!
//! One engine invocation per request: generate a short assistant reply,
//! fold it into the transcript, ask for the structured analysis, normalize.
//! The two calls are strictly sequential — the analysis input includes the
//! reply output. Failures propagate; nothing here retries or catches.

use std::sync::Arc;

use insights_core::{ConversationMessage, Insights, Role};

use crate::client::{ChatCompletion, WireMessage};
use crate::error::AnalysisError;
use crate::normalize::normalize_insights;
use crate::prompt;

/// What one successful analysis produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub insights: Insights,
    /// Short reply generated as a side effect of the flow.
    pub assistant_message: Option<String>,
}

/// Sequences the two model calls for one conversation.
///
/// Stateless; the injected [`ChatCompletion`] is the only collaborator.
pub struct AnalysisEngine {
    chat: Arc<dyn ChatCompletion>,
}

impl AnalysisEngine {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    pub async fn analyze(
        &self,
        messages: &[ConversationMessage],
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let joined = join_contents(messages);

        let reply = self.chat.complete(reply_request(messages), prompt::REPLY_TEMPERATURE).await?;
        tracing::debug!(reply_chars = reply.chars().count(), "reply step complete");

        let mut working = messages.to_vec();
        if !reply.is_empty() {
            working.push(ConversationMessage::new(Role::Agent, reply.clone()));
        }

        let content = self
            .chat
            .complete(analysis_request(&working), prompt::ANALYSIS_TEMPERATURE)
            .await?;
        let raw: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::UpstreamPayload(format!("analysis content is not valid JSON: {e}"))
        })?;

        let fallback = if reply.is_empty() {
            joined
        } else {
            format!("{joined}\n{reply}")
        };
        let insights = normalize_insights(&raw, &fallback);

        Ok(AnalysisOutcome {
            insights,
            assistant_message: if reply.is_empty() { None } else { Some(reply) },
        })
    }
}

/// Reply step: the transcript as chat history under the concise-assistant
/// prompt. `agent` speaks as the assistant, `system` stays system,
/// everything else is the user.
fn reply_request(messages: &[ConversationMessage]) -> Vec<WireMessage> {
    let mut wire = Vec::with_capacity(messages.len() + 1);
    wire.push(WireMessage::system(prompt::REPLY_SYSTEM_PROMPT));
    for m in messages {
        let role = match m.role {
            Role::Agent => "assistant",
            Role::System => "system",
            Role::User => "user",
        };
        wire.push(WireMessage::new(role, &m.content));
    }
    wire
}

/// Analysis step: the whole transcript (reply included) joined into a single
/// user message under the structured-JSON prompt.
fn analysis_request(messages: &[ConversationMessage]) -> Vec<WireMessage> {
    vec![
        WireMessage::system(prompt::ANALYSIS_SYSTEM_PROMPT),
        WireMessage::user(join_contents(messages)),
    ]
}

fn join_contents(messages: &[ConversationMessage]) -> String {
    messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use insights_core::SentimentLabel;
    use serde_json::json;

    /// Scripted client: pops queued responses, records every request.
    struct ScriptedChat {
        responses: Mutex<Vec<Result<String, AnalysisError>>>,
        calls: Mutex<Vec<(Vec<WireMessage>, f32)>>,
    }

    impl ScriptedChat {
        fn new(responses: Vec<Result<String, AnalysisError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(Vec<WireMessage>, f32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ChatCompletion for ScriptedChat {
        async fn complete(
            &self,
            messages: Vec<WireMessage>,
            temperature: f32,
        ) -> Result<String, AnalysisError> {
            self.calls.lock().unwrap().push((messages, temperature));
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn transcript() -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::new(Role::User, "My invoice is wrong"),
            ConversationMessage::new(Role::Agent, "Let me check that for you"),
        ]
    }

    fn analysis_json() -> String {
        json!({
            "sentiment": "Negative",
            "sentimentScore": 0.25,
            "topics": ["billing"],
            "actionItems": ["Fix invoice"],
            "riskFlags": [],
            "summary": "Customer reports a billing error."
        })
        .to_string()
    }

    #[tokio::test]
    async fn reply_is_incorporated_before_analysis() {
        let chat = ScriptedChat::new(vec![
            Ok("I'll correct the invoice right away.".to_string()),
            Ok(analysis_json()),
        ]);
        let engine = AnalysisEngine::new(chat.clone());

        let outcome = engine.analyze(&transcript()).await.unwrap();

        let calls = chat.calls();
        assert_eq!(calls.len(), 2);

        // First call: reply step with mapped roles and the reply prompt.
        let (reply_msgs, reply_temp) = &calls[0];
        assert_eq!(reply_temp, &prompt::REPLY_TEMPERATURE);
        assert_eq!(reply_msgs[0].role, "system");
        assert_eq!(reply_msgs[0].content, prompt::REPLY_SYSTEM_PROMPT);
        assert_eq!(reply_msgs[1].role, "user");
        assert_eq!(reply_msgs[2].role, "assistant");

        // Second call: analysis step sees the generated reply.
        let (analysis_msgs, analysis_temp) = &calls[1];
        assert_eq!(analysis_temp, &prompt::ANALYSIS_TEMPERATURE);
        assert_eq!(analysis_msgs[0].content, prompt::ANALYSIS_SYSTEM_PROMPT);
        assert_eq!(analysis_msgs.len(), 2);
        assert!(analysis_msgs[1]
            .content
            .contains("I'll correct the invoice right away."));

        assert_eq!(
            outcome.assistant_message.as_deref(),
            Some("I'll correct the invoice right away.")
        );
        assert_eq!(outcome.insights.sentiment.overall, SentimentLabel::Negative);
        assert_eq!(outcome.insights.summary, "Customer reports a billing error.");
    }

    #[tokio::test]
    async fn empty_reply_is_not_appended() {
        let chat = ScriptedChat::new(vec![Ok(String::new()), Ok(analysis_json())]);
        let engine = AnalysisEngine::new(chat.clone());

        let outcome = engine.analyze(&transcript()).await.unwrap();
        assert!(outcome.assistant_message.is_none());

        let calls = chat.calls();
        let analysis_input = &calls[1].0[1].content;
        assert_eq!(
            analysis_input,
            "My invoice is wrong\nLet me check that for you"
        );
    }

    #[tokio::test]
    async fn reply_failure_stops_the_flow() {
        let chat = ScriptedChat::new(vec![Err(AnalysisError::UpstreamStatus {
            status: 503,
            body: "overloaded".to_string(),
        })]);
        let engine = AnalysisEngine::new(chat.clone());

        let err = engine.analyze(&transcript()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::UpstreamStatus { status: 503, .. }));
        // Analysis step never ran.
        assert_eq!(chat.calls().len(), 1);
    }

    #[tokio::test]
    async fn non_json_analysis_content_is_a_payload_error() {
        let chat = ScriptedChat::new(vec![
            Ok("Sure thing!".to_string()),
            Ok("I'm sorry, here is your JSON: {}".to_string()),
        ]);
        let engine = AnalysisEngine::new(chat);

        let err = engine.analyze(&transcript()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::UpstreamPayload(_)));
    }

    #[tokio::test]
    async fn garbage_json_analysis_still_normalizes() {
        // Valid JSON of the wrong shape is the normalizer's job, not an error.
        let chat = ScriptedChat::new(vec![
            Ok("Done!".to_string()),
            Ok(json!({"sentiment": 17, "topics": "nope"}).to_string()),
        ]);
        let engine = AnalysisEngine::new(chat);

        let outcome = engine.analyze(&transcript()).await.unwrap();
        assert_eq!(outcome.insights.sentiment.overall, SentimentLabel::Neutral);
        assert!(outcome.insights.topics.is_empty());
        // Fallback summary includes the reply text.
        assert!(outcome.insights.summary.contains("Done!"));
    }
}
