use yew::prelude::*;

use crate::directory::DirectoryView;
use web_sys::HtmlInputElement;

const LIST_UNAVAILABLE: &str = "Не удалось загрузить чаты";
const SEARCH_PLACEHOLDER: &str = "Поиск";

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub directory: DirectoryView,
    pub active_chat_id: Option<String>,
    pub on_select: Callback<String>,
    pub on_new: Callback<()>,
    pub on_rename: Callback<(MouseEvent, String)>,
    pub on_delete: Callback<(MouseEvent, String)>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let query = use_state(String::new);

    let on_search = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let css = r#"
        .sidebar { width: 260px; background: var(--bg-sidebar); border-right: 1px solid var(--border-color); display: flex; flex-direction: column; padding: 10px; flex-shrink: 0; }
        .chat-list { flex-grow: 1; overflow-y: auto; margin-top: 10px; }
        .chat-item { padding: 10px; border-radius: 6px; cursor: pointer; display: flex; justify-content: space-between; align-items: center; margin-bottom: 2px; font-size: 0.9rem; color: var(--text-primary); }
        .chat-item:hover { background: #eaeaeb; }
        .chat-item.active { background: #e0e0e0; font-weight: 500; }
        .chat-item .item-btn { opacity: 0; border: none; background: none; color: #999; cursor: pointer; padding: 2px 6px; border-radius: 4px; }
        .chat-item:hover .item-btn { opacity: 1; }
        .chat-item .item-btn:hover { background: #dcdcdc; color: #d32f2f; }
        .list-placeholder { color: var(--text-secondary); padding: 8px; font-size: 0.9rem; }
        .new-chat-btn { width: 100%; padding: 10px; border: 1px solid var(--border-color); background: white; border-radius: 6px; cursor: pointer; text-align: left; display: flex; gap: 10px; transition: background 0.2s; }
        .new-chat-btn:hover { background: #f0f0f0; }
        .search-input { width: 100%; padding: 8px; border: 1px solid var(--border-color); border-radius: 6px; margin-top: 10px; font-family: inherit; }
    "#;

    let list = match &props.directory {
        DirectoryView::Loading => html! {},
        DirectoryView::Unavailable => {
            html! { <div class="list-placeholder">{ LIST_UNAVAILABLE }</div> }
        }
        DirectoryView::Loaded(directory) => {
            let needle = query.to_lowercase();
            html! {
                { for directory
                    .iter()
                    .filter(|(_, info)| {
                        needle.is_empty() || info.title().to_lowercase().contains(&needle)
                    })
                    .map(|(id, info)| {
                        let is_active = props.active_chat_id.as_deref() == Some(id.as_str());
                        let active_class = if is_active { "active" } else { "" };
                        let on_sel = props.on_select.clone();
                        let on_ren = props.on_rename.clone();
                        let on_del = props.on_delete.clone();
                        let id_sel = id.clone();
                        let id_ren = id.clone();
                        let id_del = id.clone();

                        html! {
                            <div
                                class={format!("chat-item {}", active_class)}
                                onclick={Callback::from(move |_| on_sel.emit(id_sel.clone()))}
                            >
                                <span style="overflow: hidden; text-overflow: ellipsis; white-space: nowrap;">{ info.title() }</span>
                                <span style="display: flex; flex-shrink: 0;">
                                    <button
                                        class="item-btn"
                                        title="Переименовать"
                                        onclick={Callback::from(move |e| on_ren.emit((e, id_ren.clone())))}
                                    >{ "✎" }</button>
                                    <button
                                        class="item-btn"
                                        title="Удалить"
                                        onclick={Callback::from(move |e| on_del.emit((e, id_del.clone())))}
                                    >{ "×" }</button>
                                </span>
                            </div>
                        }
                    })
                }
            }
        }
    };

    html! {
        <>
            <style>{ css }</style>
            <div class="sidebar">
                <button class="new-chat-btn" onclick={props.on_new.reform(|_| ())}>
                    <span>{ "+" }</span>
                    <span>{ "Новый чат" }</span>
                </button>
                <input
                    class="search-input"
                    type="text"
                    placeholder={SEARCH_PLACEHOLDER}
                    value={(*query).clone()}
                    oninput={on_search}
                />
                <div class="chat-list">
                    { list }
                </div>
            </div>
        </>
    }
}
