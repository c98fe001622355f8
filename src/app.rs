use anyhow::Result;
use web_sys::console;
use yew::prelude::*;

use crate::components::{chat_area::ChatArea, sidebar::Sidebar};
use crate::directory::{validate_title, DirectoryView};
use crate::models::{ChatDetail, ChatDirectory, NewChatResponse, SendMessageResponse};
use crate::services::api::{ChatApi, API_PREFIX};
use crate::session::{SendRejection, Session, MSG_NO_REPLY};

const APP_TITLE: &str = "LearnX AI";

const MSG_CREATE_FAILED: &str = "Не удалось создать чат";
const MSG_CREATE_FIRST: &str = "Сначала создайте чат.";
const MSG_RENAME_FAILED: &str = "Не удалось переименовать чат.";
const PROMPT_RENAME: &str = "Новое название чата:";
const CONFIRM_DELETE: &str = "Удалить чат?";

const GLOBAL_STYLES: &str = r#"
    :root {
        --bg-app: #ffffff;
        --bg-sidebar: #f9f9f9;
        --border-color: #e5e5e5;
        --text-primary: #333;
        --text-secondary: #666;
        --accent-color: #10a37f;
        --accent-hover: #1a7f64;
        --danger-color: #ef4444;
    }

    * { box-sizing: border-box; }
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; color: var(--text-primary); }

    .app-container { display: flex; height: 100vh; overflow: hidden; }
    .main-content { flex-grow: 1; display: flex; flex-direction: column; position: relative; background: var(--bg-app); }
    .header { padding: 10px 20px; border-bottom: 1px solid var(--border-color); display: flex; justify-content: space-between; align-items: center; height: 60px; }
    .header h2 { font-size: 1rem; margin: 0; font-weight: 600; overflow: hidden; white-space: nowrap; text-overflow: ellipsis; max-width: 500px; }

    .markdown-body { line-height: 1.6; }
    .markdown-body code { background: #f4f4f4; padding: 2px 4px; border-radius: 4px; font-family: monospace; font-size: 0.9em; }
    .markdown-body p { margin-top: 0; margin-bottom: 0.5em; }
    .markdown-body p:last-child { margin-bottom: 0; }
"#;

/// Commands and completions of the session. User events become the plain
/// variants; every network call comes back as a `*Loaded`/`*Settled`/
/// `*Received` variant carrying its `anyhow::Result`, so no failure ever
/// escapes a handler.
pub enum Msg {
    DirectoryLoaded(Result<ChatDirectory>),
    SelectChat(String),
    ChatOpened { generation: u64, result: Result<ChatDetail> },
    NewChat,
    ChatCreated(Result<NewChatResponse>),
    SendDraft(String),
    ReplyReceived { generation: u64, result: Result<SendMessageResponse> },
    RenameChat(String),
    RenameSettled { id: String, title: String, result: Result<()> },
    DeleteChat(String),
    DeleteSettled(Result<()>),
}

pub struct App {
    session: Session,
    directory: DirectoryView,
    api_base: String,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let api_base = api_base();
        {
            let base = api_base.clone();
            ctx.link()
                .send_future(async move { Msg::DirectoryLoaded(ChatApi::list_chats(&base).await) });
        }
        // ?chat=<id> opens a chat straight from the address bar.
        if let Some(id) = initial_chat_from_url() {
            ctx.link().send_message(Msg::SelectChat(id));
        }

        Self {
            session: Session::default(),
            directory: DirectoryView::default(),
            api_base,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::DirectoryLoaded(result) => {
                if let Err(err) = &result {
                    console::error_1(&format!("list_chats failed: {:?}", err).into());
                }
                self.directory = DirectoryView::from_list(result);
                true
            }

            Msg::SelectChat(id) => {
                let generation = self.session.begin_open(&id);
                let base = self.api_base.clone();
                ctx.link().send_future(async move {
                    let result = ChatApi::get_chat(&base, &id).await;
                    Msg::ChatOpened { generation, result }
                });
                true
            }

            Msg::ChatOpened { generation, result } => {
                self.session.finish_open(generation, result);
                true
            }

            Msg::NewChat => {
                let base = self.api_base.clone();
                ctx.link()
                    .send_future(async move { Msg::ChatCreated(ChatApi::create_chat(&base).await) });
                false
            }

            Msg::ChatCreated(Ok(created)) => {
                self.session.open_created(&created.chat_id);
                self.reload_directory(ctx);
                true
            }

            Msg::ChatCreated(Err(err)) => {
                console::error_1(&format!("new_chat failed: {:?}", err).into());
                alert(MSG_CREATE_FAILED);
                false
            }

            Msg::SendDraft(draft) => match self.session.begin_send(&draft) {
                Ok(pending) => {
                    let base = self.api_base.clone();
                    ctx.link().send_future(async move {
                        let result =
                            ChatApi::send_message(&base, &pending.chat_id, &pending.text).await;
                        Msg::ReplyReceived { generation: pending.generation, result }
                    });
                    true
                }
                Err(SendRejection::NoChatOpen) => {
                    alert(MSG_CREATE_FIRST);
                    false
                }
                Err(SendRejection::EmptyMessage) => false,
            },

            Msg::ReplyReceived { generation, result } => {
                let reply = match result {
                    Ok(resp) => Ok(resp.reply.unwrap_or_else(|| MSG_NO_REPLY.to_string())),
                    Err(err) => {
                        console::error_1(&format!("send failed: {:?}", err).into());
                        Err(err)
                    }
                };
                if self.session.finish_send(generation, reply) {
                    // The server may have retitled the chat from its content.
                    self.reload_directory(ctx);
                }
                true
            }

            Msg::RenameChat(id) => {
                match prompt(PROMPT_RENAME).as_deref().and_then(validate_title) {
                    Some(title) => {
                        let base = self.api_base.clone();
                        ctx.link().send_future(async move {
                            let result = ChatApi::rename_chat(&base, &id, &title).await;
                            Msg::RenameSettled { id, title, result }
                        });
                    }
                    // Blank answer or cancelled prompt: no request at all.
                    None => {}
                }
                false
            }

            Msg::RenameSettled { id, title, result } => match result {
                Ok(()) => {
                    self.session.chat_renamed(&id, &title);
                    self.reload_directory(ctx);
                    true
                }
                Err(err) => {
                    console::error_1(&format!("rename_chat failed: {:?}", err).into());
                    alert(MSG_RENAME_FAILED);
                    false
                }
            },

            Msg::DeleteChat(id) => {
                if !confirm(CONFIRM_DELETE) {
                    return false;
                }
                // Close the chat before the server answers: the transition
                // must not depend on the request's outcome.
                self.session.chat_deleted(&id);
                let base = self.api_base.clone();
                ctx.link().send_future(async move {
                    Msg::DeleteSettled(ChatApi::delete_chat(&base, &id).await)
                });
                true
            }

            Msg::DeleteSettled(result) => {
                if let Err(err) = result {
                    console::error_1(&format!("delete_chat failed: {:?}", err).into());
                }
                // Re-list on success and failure alike; the listing is the
                // source of truth.
                self.reload_directory(ctx);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_select = ctx.link().callback(Msg::SelectChat);
        let on_new = ctx.link().callback(|_| Msg::NewChat);
        let on_send = ctx.link().callback(Msg::SendDraft);
        let on_rename = ctx.link().callback(|(e, id): (MouseEvent, String)| {
            e.stop_propagation();
            Msg::RenameChat(id)
        });
        let on_delete = ctx.link().callback(|(e, id): (MouseEvent, String)| {
            e.stop_propagation();
            Msg::DeleteChat(id)
        });

        let header = match self.session.title() {
            Some(title) => format!("{} — {}", APP_TITLE, title),
            None => APP_TITLE.to_string(),
        };

        html! {
            <>
                <style>{ GLOBAL_STYLES }</style>
                <div class="app-container">
                    <Sidebar
                        directory={self.directory.clone()}
                        active_chat_id={self.session.open_chat().map(String::from)}
                        {on_select}
                        {on_new}
                        {on_rename}
                        {on_delete}
                    />

                    <div class="main-content">
                        <div class="header">
                            <h2>{ header }</h2>
                        </div>

                        <ChatArea
                            messages={self.session.transcript().to_vec()}
                            thinking={self.session.thinking()}
                            {on_send}
                        />
                    </div>
                </div>
            </>
        }
    }
}

impl App {
    fn reload_directory(&self, ctx: &Context<Self>) {
        let base = self.api_base.clone();
        ctx.link()
            .send_future(async move { Msg::DirectoryLoaded(ChatApi::list_chats(&base).await) });
    }
}

fn api_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .map(|origin| format!("{}{}", origin, API_PREFIX))
        .unwrap_or_else(|| API_PREFIX.to_string())
}

fn initial_chat_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("chat")
}

fn alert(text: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(text);
    }
}

fn confirm(text: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(text).ok())
        .unwrap_or(false)
}

fn prompt(text: &str) -> Option<String> {
    web_sys::window()?.prompt_with_message(text).ok()?
}
