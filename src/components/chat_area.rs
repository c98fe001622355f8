use web_sys::{HtmlElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::models::{Message, Role};
use crate::utils::render_markdown;

const THINKING: &str = "LearnX AI думает…";
const INPUT_PLACEHOLDER: &str = "Напишите сообщение…";

#[derive(Properties, PartialEq)]
pub struct ChatAreaProps {
    pub messages: Vec<Message>,
    pub thinking: bool,
    pub on_send: Callback<String>,
}

#[function_component(ChatArea)]
pub fn chat_area(props: &ChatAreaProps) -> Html {
    let input_text = use_state(String::new);
    let scroll_ref = use_node_ref();

    // Keep the newest message in view.
    {
        let div_ref = scroll_ref.clone();
        use_effect_with((props.messages.len(), props.thinking), move |_| {
            if let Some(div) = div_ref.cast::<HtmlElement>() {
                div.set_scroll_top(div.scroll_height());
            }
        });
    }

    let submit = {
        let text = input_text.clone();
        let on_send = props.on_send.clone();
        move || {
            if !text.trim().is_empty() {
                on_send.emit((*text).clone());
                text.set(String::new());
            }
        }
    };

    let on_submit = {
        let submit = submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit();
        })
    };

    // Enter sends, Shift+Enter keeps the newline. The input stays live while
    // a reply is pending: switching chats or sending again mid-flight is
    // allowed, stale replies are dropped upstream.
    let on_keydown = {
        let submit = submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() {
                e.prevent_default();
                submit();
            }
        })
    };

    let on_input = {
        let text = input_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let css = r#"
        .messages-container { flex-grow: 1; overflow-y: auto; padding: 20px; display: flex; flex-direction: column; gap: 15px; background-color: #ffffff; scroll-behavior: smooth; }

        .message-row { display: flex; width: 100%; }
        .message-row.user { justify-content: flex-end; }
        .message-row.bot { justify-content: flex-start; }

        .bubble-group { display: flex; gap: 10px; max-width: 85%; align-items: flex-end; }
        .message-row.user .bubble-group { flex-direction: row-reverse; }

        .avatar { width: 32px; height: 32px; border-radius: 50%; display: flex; align-items: center; justify-content: center; flex-shrink: 0; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .avatar.user { background: #555; color: white; }
        .avatar.bot { background: var(--accent-color); color: white; }

        .msg-bubble { padding: 10px 15px; border-radius: 12px; font-size: 0.95rem; line-height: 1.5; box-shadow: 0 1px 2px rgba(0,0,0,0.05); min-width: 0; overflow-wrap: anywhere; word-break: break-word; max-width: 100%; }
        .message-row.user .msg-bubble { background-color: #e3f2fd; color: #1565c0; border-bottom-right-radius: 2px; }
        .message-row.bot .msg-bubble { background-color: #f5f5f5; color: #333; border-bottom-left-radius: 2px; }

        .input-wrapper { border-top: 1px solid var(--border-color); padding: 20px; display: flex; justify-content: center; background: white; }
        .input-container { width: 100%; max-width: 900px; position: relative; display: flex; flex-direction: column; }
        .chat-input { width: 100%; padding: 12px; padding-right: 45px; border: 1px solid var(--border-color); border-radius: 8px; box-shadow: 0 2px 5px rgba(0,0,0,0.05); resize: none; font-family: inherit; outline: none; transition: border 0.2s; }
        .chat-input:focus { border-color: var(--accent-color); box-shadow: 0 0 0 2px rgba(16, 163, 127, 0.1); }
        .send-btn { position: absolute; right: 8px; bottom: 8px; background: var(--accent-color); color: white; border: none; border-radius: 4px; padding: 6px 10px; cursor: pointer; transition: opacity 0.2s; }
        .send-btn:disabled { background: #ccc; cursor: default; }
        .send-btn:hover:not(:disabled) { background: var(--accent-hover); }
    "#;

    let user_icon = html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d="M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2"></path>
            <circle cx="12" cy="7" r="4"></circle>
        </svg>
    };
    let bot_icon = html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <rect x="3" y="11" width="18" height="10" rx="2"></rect>
            <circle cx="12" cy="5" r="2"></circle>
            <path d="M12 7v4"></path>
            <line x1="8" y1="16" x2="8" y2="16"></line>
            <line x1="16" y1="16" x2="16" y2="16"></line>
        </svg>
    };

    html! {
        <>
            <style>{ css }</style>

            <div class="messages-container" ref={scroll_ref}>
                { for props.messages.iter().map(|msg| {
                    let (role_cls, icon) = match msg.role {
                        Role::User => ("user", user_icon.clone()),
                        Role::Bot => ("bot", bot_icon.clone()),
                    };
                    html! {
                        <div class={format!("message-row {}", role_cls)}>
                            <div class="bubble-group">
                                <div class={format!("avatar {}", role_cls)}>{ icon }</div>
                                <div class="msg-bubble">{ render_markdown(&msg.content) }</div>
                            </div>
                        </div>
                    }
                })}

                if props.thinking {
                    <div class="message-row bot">
                        <div class="bubble-group">
                            <div class="avatar bot">{ bot_icon.clone() }</div>
                            <div class="msg-bubble" style="color: #888; font-style: italic;">
                                { THINKING }
                            </div>
                        </div>
                    </div>
                }
            </div>

            <div class="input-wrapper">
                <form class="input-container" onsubmit={on_submit}>
                    <textarea
                        class="chat-input"
                        rows="1"
                        placeholder={INPUT_PLACEHOLDER}
                        value={(*input_text).clone()}
                        oninput={on_input}
                        onkeydown={on_keydown}
                        style="height: 50px; overflow-y: hidden;"
                    />
                    <button type="submit" class="send-btn" disabled={input_text.trim().is_empty()}>
                        { "Отправить" }
                    </button>
                </form>
            </div>
        </>
    }
}
