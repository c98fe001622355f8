use anyhow::Result;

use crate::models::{ChatDetail, Message, DEFAULT_CHAT_TITLE};

/// Appended locally right after the backend confirms a new chat; never
/// fetched back from the server.
pub const MSG_CHAT_CREATED: &str = "Новый чат создан.";
/// Shown instead of a transcript when fetching a chat's history fails.
pub const MSG_CHAT_LOAD_FAILED: &str = "Не удалось загрузить этот чат.";
/// Shown when a send fails in transport; the user echo stays, nothing is
/// retried.
pub const MSG_SEND_FAILED: &str = "Ошибка соединения с ИИ.";
/// Shown when a send comes back 200 but without a usable reply.
pub const MSG_NO_REPLY: &str = "Не удалось получить ответ от AI.";

/// A send accepted by [`Session::begin_send`]. Carries the generation stamp
/// the completion must present to be allowed to touch the transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSend {
    pub chat_id: String,
    pub text: String,
    pub generation: u64,
}

/// Why a send was refused without issuing a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendRejection {
    NoChatOpen,
    EmptyMessage,
}

/// View model of the single open chat: which chat is open, its rendered
/// transcript, and whether a reply is pending.
///
/// All network suspension points are split into a synchronous `begin_*`
/// (mutates state, hands out the current generation) and a `finish_*` taking
/// that generation back. Every operation that makes earlier in-flight
/// responses unwelcome bumps `generation`, so a completion whose stamp no
/// longer matches is dropped: latest call wins, older responses never
/// overwrite.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Session {
    open_chat: Option<String>,
    title: Option<String>,
    transcript: Vec<Message>,
    thinking: bool,
    generation: u64,
}

impl Session {
    pub fn open_chat(&self) -> Option<&str> {
        self.open_chat.as_deref()
    }

    /// Title of the open chat, once known.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn thinking(&self) -> bool {
        self.thinking
    }

    /// Switch to `id`. The transcript is cleared synchronously, before the
    /// history fetch resolves, so a stale chat's messages are never visible
    /// under the new one. Re-opening the already-open id is not
    /// short-circuited: the refetch is what keeps the transcript honest after
    /// any server-side mutation.
    pub fn begin_open(&mut self, id: &str) -> u64 {
        self.open_chat = Some(id.to_string());
        self.title = None;
        self.transcript.clear();
        self.thinking = false;
        self.generation += 1;
        self.generation
    }

    /// Apply the history fetch started by [`Session::begin_open`]. Dropped
    /// entirely when another open/send/create has happened since.
    pub fn finish_open(&mut self, generation: u64, detail: Result<ChatDetail>) {
        if generation != self.generation {
            return;
        }
        match detail {
            Ok(detail) => {
                self.title = Some(detail.title.unwrap_or_else(|| DEFAULT_CHAT_TITLE.to_string()));
                self.transcript.extend(detail.messages);
            }
            Err(_) => self.transcript.push(Message::bot(MSG_CHAT_LOAD_FAILED)),
        }
    }

    /// Switch to a chat the backend just created. The transcript starts with
    /// a synthetic confirmation instead of a fetch.
    pub fn open_created(&mut self, id: &str) {
        self.open_chat = Some(id.to_string());
        self.title = Some(DEFAULT_CHAT_TITLE.to_string());
        self.transcript = vec![Message::bot(MSG_CHAT_CREATED)];
        self.thinking = false;
        self.generation += 1;
    }

    /// Accept a draft for sending: echo it into the transcript immediately
    /// (the echo is never rolled back), raise the thinking placeholder, and
    /// stamp the request. Refused without side effects when no chat is open
    /// or the draft is blank.
    pub fn begin_send(&mut self, draft: &str) -> Result<PendingSend, SendRejection> {
        let chat_id = self.open_chat.clone().ok_or(SendRejection::NoChatOpen)?;
        let text = draft.trim();
        if text.is_empty() {
            return Err(SendRejection::EmptyMessage);
        }
        self.transcript.push(Message::user(text));
        self.thinking = true;
        self.generation += 1;
        Ok(PendingSend { chat_id, text: text.to_string(), generation: self.generation })
    }

    /// Apply a send's outcome. A stale completion may only take the thinking
    /// placeholder down; its reply belongs to a chat state the user has
    /// since navigated away from. Returns whether a reply was appended, in
    /// which case the caller should re-list the directory (titles may have
    /// changed server-side).
    pub fn finish_send(&mut self, generation: u64, reply: Result<String>) -> bool {
        self.thinking = false;
        if generation != self.generation {
            return false;
        }
        match reply {
            Ok(reply) => {
                self.transcript.push(Message::bot(reply));
                true
            }
            Err(_) => {
                self.transcript.push(Message::bot(MSG_SEND_FAILED));
                false
            }
        }
    }

    /// A chat was renamed server-side; only the displayed title of the open
    /// chat follows, the transcript is untouched.
    pub fn chat_renamed(&mut self, id: &str, title: &str) {
        if self.open_chat.as_deref() == Some(id) {
            self.title = Some(title.to_string());
        }
    }

    /// A chat is being deleted. Called before the request is issued: if it is
    /// the open one, the session falls back to no-chat-open right away,
    /// whatever the server ends up answering, and any in-flight reply for it
    /// becomes stale.
    pub fn chat_deleted(&mut self, id: &str) {
        if self.open_chat.as_deref() == Some(id) {
            self.open_chat = None;
            self.title = None;
            self.transcript.clear();
            self.thinking = false;
            self.generation += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use anyhow::anyhow;

    fn detail(title: &str, messages: Vec<Message>) -> ChatDetail {
        ChatDetail { title: Some(title.to_string()), messages }
    }

    fn opened(id: &str) -> Session {
        let mut session = Session::default();
        let generation = session.begin_open(id);
        session.finish_open(generation, Ok(detail("Math", vec![])));
        session
    }

    #[test]
    fn send_without_open_chat_is_rejected() {
        let mut session = Session::default();
        assert_eq!(session.begin_send("hi"), Err(SendRejection::NoChatOpen));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn blank_draft_is_rejected() {
        let mut session = opened("c1");
        assert_eq!(session.begin_send("   \n"), Err(SendRejection::EmptyMessage));
        assert!(session.transcript().is_empty());
        assert!(!session.thinking());
    }

    #[test]
    fn send_round_trip() {
        let mut session = opened("c1");
        let pending = session.begin_send("hi").unwrap();
        assert_eq!(pending.chat_id, "c1");
        assert!(session.thinking());

        let applied = session.finish_send(pending.generation, Ok("hello".to_string()));
        assert!(applied);
        assert!(!session.thinking());
        assert_eq!(
            session.transcript(),
            &[Message::user("hi"), Message::bot("hello")]
        );
    }

    #[test]
    fn overlapping_sends_keep_only_latest_reply() {
        let mut session = opened("c1");
        let first = session.begin_send("A").unwrap();
        let second = session.begin_send("B").unwrap();

        // B resolves first and is current; A arrives afterwards, stale.
        assert!(session.finish_send(second.generation, Ok("reply B".to_string())));
        assert!(!session.finish_send(first.generation, Ok("reply A".to_string())));

        assert_eq!(
            session.transcript(),
            &[Message::user("A"), Message::user("B"), Message::bot("reply B")]
        );
    }

    #[test]
    fn stale_send_still_lowers_thinking() {
        let mut session = opened("c1");
        let first = session.begin_send("A").unwrap();
        let _second = session.begin_send("B").unwrap();

        session.finish_send(first.generation, Ok("reply A".to_string()));
        assert!(!session.thinking());
        assert_eq!(
            session.transcript(),
            &[Message::user("A"), Message::user("B")]
        );
    }

    #[test]
    fn send_failure_appends_single_error() {
        let mut session = opened("c1");
        let pending = session.begin_send("hi").unwrap();
        let applied = session.finish_send(pending.generation, Err(anyhow!("network")));
        assert!(!applied);
        assert_eq!(
            session.transcript(),
            &[Message::user("hi"), Message::bot(MSG_SEND_FAILED)]
        );
    }

    #[test]
    fn missing_reply_fallback_is_callers_choice() {
        // The app maps a bodyless 200 to MSG_NO_REPLY before finish_send.
        let mut session = opened("c1");
        let pending = session.begin_send("hi").unwrap();
        session.finish_send(pending.generation, Ok(MSG_NO_REPLY.to_string()));
        assert_eq!(session.transcript().last(), Some(&Message::bot(MSG_NO_REPLY)));
    }

    #[test]
    fn open_clears_before_fetch_resolves() {
        let mut session = opened("c1");
        let pending = session.begin_send("hi").unwrap();
        session.finish_send(pending.generation, Ok("hello".to_string()));

        session.begin_open("c2");
        assert!(session.transcript().is_empty());
        assert_eq!(session.open_chat(), Some("c2"));
        assert_eq!(session.title(), None);
    }

    #[test]
    fn switching_chats_discards_older_fetch() {
        let mut session = Session::default();
        let first = session.begin_open("x");
        let second = session.begin_open("y");

        session.finish_open(first, Ok(detail("X", vec![Message::bot("from x")])));
        assert!(session.transcript().is_empty());

        session.finish_open(second, Ok(detail("Y", vec![Message::bot("from y")])));
        assert_eq!(session.transcript(), &[Message::bot("from y")]);
        assert_eq!(session.title(), Some("Y"));
    }

    #[test]
    fn reopening_same_chat_refetches() {
        let mut session = opened("c1");
        let pending = session.begin_send("hi").unwrap();
        session.finish_send(pending.generation, Ok("hello".to_string()));

        let generation = session.begin_open("c1");
        assert!(session.transcript().is_empty());
        session.finish_open(generation, Ok(detail("Math", vec![Message::user("hi")])));
        assert_eq!(session.transcript(), &[Message::user("hi")]);
    }

    #[test]
    fn open_failure_shows_placeholder_message() {
        let mut session = Session::default();
        let generation = session.begin_open("c1");
        session.finish_open(generation, Err(anyhow!("network")));
        assert_eq!(session.transcript(), &[Message::bot(MSG_CHAT_LOAD_FAILED)]);
    }

    #[test]
    fn open_invalidates_pending_send() {
        let mut session = opened("c1");
        let pending = session.begin_send("hi").unwrap();

        let generation = session.begin_open("c2");
        session.finish_open(generation, Ok(detail("Other", vec![])));

        // The reply belongs to c1; it must not land in c2's transcript.
        session.finish_send(pending.generation, Ok("late".to_string()));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn created_chat_opens_with_synthetic_message() {
        let mut session = Session::default();
        session.open_created("c9");
        assert_eq!(session.open_chat(), Some("c9"));
        assert_eq!(session.title(), Some(DEFAULT_CHAT_TITLE));
        assert_eq!(session.transcript(), &[Message::bot(MSG_CHAT_CREATED)]);
    }

    #[test]
    fn deleting_open_chat_resets_session() {
        let mut session = opened("c1");
        let pending = session.begin_send("hi").unwrap();

        session.chat_deleted("c1");
        assert_eq!(session.open_chat(), None);
        assert_eq!(session.title(), None);
        assert!(session.transcript().is_empty());
        assert!(!session.thinking());

        // The in-flight reply is now stale.
        session.finish_send(pending.generation, Ok("late".to_string()));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn deleting_other_chat_leaves_session_alone() {
        let mut session = opened("c1");
        let pending = session.begin_send("hi").unwrap();

        session.chat_deleted("c2");
        assert_eq!(session.open_chat(), Some("c1"));
        assert!(session.thinking());

        assert!(session.finish_send(pending.generation, Ok("hello".to_string())));
        assert_eq!(session.transcript().last(), Some(&Message::bot("hello")));
    }

    #[test]
    fn rename_touches_title_only() {
        let mut session = opened("c1");
        let pending = session.begin_send("hi").unwrap();
        session.finish_send(pending.generation, Ok("hello".to_string()));
        let before = session.transcript().to_vec();

        session.chat_renamed("c1", "Algebra");
        assert_eq!(session.title(), Some("Algebra"));
        assert_eq!(session.transcript(), before.as_slice());

        session.chat_renamed("c2", "Elsewhere");
        assert_eq!(session.title(), Some("Algebra"));
    }

    #[test]
    fn fetched_history_lands_in_order() {
        let mut session = Session::default();
        let generation = session.begin_open("c1");
        let history = vec![
            Message::user("1"),
            Message::bot("2"),
            Message::user("3"),
        ];
        session.finish_open(generation, Ok(detail("Math", history.clone())));
        assert_eq!(session.transcript(), history.as_slice());
        assert_eq!(session.transcript()[0].role, Role::User);
    }
}
