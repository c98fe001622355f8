use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Title the backend assigns to a freshly created chat; also the display
/// fallback when a listing entry carries no title.
pub const DEFAULT_CHAT_TITLE: &str = "Новый чат";

/// Who produced a message. The backend historically stores `"assistant"` for
/// some bot turns, so anything that is not `user` deserializes as `Bot`.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    User,
    Bot,
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        if raw == "user" {
            Role::User
        } else {
            Role::Bot
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self { role: Role::Bot, content: content.into() }
    }
}

/// One entry of the chat listing. Extra fields the server includes
/// (`created_at`) are ignored.
#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
pub struct ChatInfo {
    #[serde(default)]
    pub title: Option<String>,
}

impl ChatInfo {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_CHAT_TITLE)
    }
}

/// Full snapshot of the server's chats, in server order. Ids are opaque
/// strings the backend invented; the client never fabricates one.
pub type ChatDirectory = IndexMap<String, ChatInfo>;

/// `GET /get_chat/{id}` body. The server answers `{}` for an unknown id.
#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
pub struct ChatDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct NewChatResponse {
    pub chat_id: String,
}

#[derive(Serialize, Debug)]
pub struct SendMessageRequest {
    pub message: String,
}

/// A 200 whose body lacks a string `reply` still counts as an answer; the
/// caller substitutes a localized fallback.
#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub reply: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct RenameChatRequest {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_maps_id_to_title() {
        let dir: ChatDirectory = serde_json::from_str(r#"{"c1": {"title": "Math"}}"#).unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir["c1"].title(), "Math");
    }

    #[test]
    fn listing_preserves_server_order() {
        let dir: ChatDirectory = serde_json::from_str(
            r#"{"b2": {"title": "Second"}, "a1": {"title": "First"}}"#,
        )
        .unwrap();
        let ids: Vec<&str> = dir.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["b2", "a1"]);
    }

    #[test]
    fn listing_entry_without_title_falls_back() {
        let dir: ChatDirectory =
            serde_json::from_str(r#"{"c1": {"created_at": "2024-01-01T00:00:00"}}"#).unwrap();
        assert_eq!(dir["c1"].title(), DEFAULT_CHAT_TITLE);
    }

    #[test]
    fn unknown_chat_detail_is_empty() {
        let detail: ChatDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(detail.title, None);
        assert!(detail.messages.is_empty());
    }

    #[test]
    fn assistant_role_reads_as_bot() {
        let msg: Message =
            serde_json::from_str(r#"{"role": "assistant", "content": "x", "time": "t"}"#).unwrap();
        assert_eq!(msg.role, Role::Bot);
    }

    #[test]
    fn reply_may_be_absent() {
        let resp: SendMessageResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.reply, None);
    }
}
