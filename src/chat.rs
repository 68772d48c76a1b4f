use iced::widget::{container, row, text, Space};
use iced::{alignment, Element, Length, Theme};
use serde_json::Value;

use crate::api::{ApiError, ArtQuestion};
use crate::theme;

const ANSWER_KEYS: [&str; 4] = ["answer", "response", "message", "text"];
const STYLE_KEYS: [&str; 4] = ["style_prediction", "predicted_style", "style", "label"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        ChatTurn {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatTurn {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One turn as a bubble: user on the right, assistant on the left.
pub fn bubble<'a, Message: 'a>(turn: &'a ChatTurn) -> Element<'a, Message> {
    let is_user = turn.role == Role::User;

    let badge = container(text(if is_user { "You" } else { "AI" }).size(11).font(theme::SEMIBOLD))
        .width(28)
        .height(28)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(theme::badge(!is_user));

    let style: fn(&Theme) -> container::Style = if is_user {
        theme::user_bubble
    } else {
        theme::assistant_bubble
    };
    let body = container(text(&turn.content).size(14))
        .padding(16)
        .max_width(560)
        .style(style);

    let line = if is_user {
        row![Space::with_width(Length::Fill), body, badge]
    } else {
        row![badge, body, Space::with_width(Length::Fill)]
    };

    line.spacing(12).width(Length::Fill).into()
}

/// Follow-up questions about an analyzed artwork.
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
    draft: String,
    session_id: Option<String>,
    pending: bool,
}

impl Conversation {
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    /// Moves the draft into the transcript and builds the request for it.
    /// Returns `None` for a blank draft or while an answer is pending.
    pub fn ask(&mut self, artist: Option<&str>, top_k: u32) -> Option<ArtQuestion> {
        let query = self.draft.trim().to_string();
        if query.is_empty() || self.pending {
            return None;
        }

        self.draft.clear();
        self.turns.push(ChatTurn::user(query.clone()));
        self.pending = true;

        Some(ArtQuestion {
            query,
            style_prediction: artist.map(str::to_string),
            creative_story_mode: false,
            session_id: self.session_id.clone(),
            top_k,
        })
    }

    pub fn receive(&mut self, outcome: Result<Value, ApiError>) {
        self.pending = false;
        match outcome {
            Ok(value) => {
                if let Some(session) = value.get("session_id").and_then(Value::as_str) {
                    self.session_id = Some(session.to_string());
                }
                self.turns.push(ChatTurn::assistant(answer_text(&value)));
            }
            Err(e) => {
                self.turns.push(ChatTurn::assistant(format!("Sorry, that failed. {}", e)));
            }
        }
    }

    /// Adds a turn that did not come from a question, e.g. a comparison.
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        *self = Conversation::default();
    }
}

/// Style label from a `/detect-art` reply, if it carries one.
pub fn style_label(value: &Value) -> Option<String> {
    STYLE_KEYS
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
}

/// Picks the human-readable answer out of an `/ask-about-art` reply.
pub fn answer_text(value: &Value) -> String {
    if let Some(answer) = value.as_str() {
        return answer.to_string();
    }

    ANSWER_KEYS
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| serde_json::to_string_pretty(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ask_moves_draft_into_transcript() {
        let mut chat = Conversation::default();
        chat.set_draft("  What palette did she use?  ".to_string());

        let question = chat.ask(Some("Frida Kahlo"), 3).unwrap();
        assert_eq!(question.query, "What palette did she use?");
        assert_eq!(question.style_prediction.as_deref(), Some("Frida Kahlo"));
        assert_eq!(question.session_id, None);
        assert_eq!(chat.draft(), "");
        assert_eq!(chat.turns(), &[ChatTurn::user("What palette did she use?")]);
        assert!(chat.is_pending());
    }

    #[test]
    fn test_blank_or_pending_ask_is_ignored() {
        let mut chat = Conversation::default();
        chat.set_draft("   ".to_string());
        assert!(chat.ask(None, 3).is_none());

        chat.set_draft("first".to_string());
        chat.ask(None, 3).unwrap();
        chat.set_draft("second".to_string());
        assert!(chat.ask(None, 3).is_none());
        assert_eq!(chat.draft(), "second");
    }

    #[test]
    fn test_receive_keeps_session() {
        let mut chat = Conversation::default();
        chat.set_draft("hi".to_string());
        chat.ask(None, 3);
        chat.receive(Ok(json!({"answer": "Hello!", "session_id": "s-1"})));

        assert!(!chat.is_pending());
        assert_eq!(chat.turns()[1], ChatTurn::assistant("Hello!"));

        chat.set_draft("again".to_string());
        let question = chat.ask(None, 3).unwrap();
        assert_eq!(question.session_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn test_receive_error_becomes_assistant_turn() {
        let mut chat = Conversation::default();
        chat.set_draft("hi".to_string());
        chat.ask(None, 3);
        chat.receive(Err(ApiError::Http {
            status: 503,
            body: "busy".to_string(),
        }));

        let last = chat.turns().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert!(last.content.contains("503 - busy"));
    }

    #[test]
    fn test_answer_text_fallbacks() {
        assert_eq!(answer_text(&json!("plain")), "plain");
        assert_eq!(answer_text(&json!({"response": "r"})), "r");
        assert!(answer_text(&json!({"other": 1})).contains("\"other\": 1"));
    }

    #[test]
    fn test_style_label() {
        assert_eq!(style_label(&json!({"style": " Impressionism "})).as_deref(), Some("Impressionism"));
        assert_eq!(style_label(&json!({"predicted_style": "Cubism", "style": "x"})).as_deref(), Some("Cubism"));
        assert_eq!(style_label(&json!({"style": ""})), None);
        assert_eq!(style_label(&json!({"scores": [0.1]})), None);
    }
}
