use anyhow::Result;
use reqwest::Client;

use crate::models::{
    ChatDetail, ChatDirectory, NewChatResponse, RenameChatRequest, SendMessageRequest,
    SendMessageResponse,
};

/// Routing prefix of the chat surface. The same endpoints also exist
/// unprefixed; pointing the client at them is this one constant.
pub const API_PREFIX: &str = "/full";

/// HTTP client for the chat backend. Any non-success status is a plain
/// failure; the body is not parsed for error detail.
pub struct ChatApi;

impl ChatApi {
    fn endpoint(base: &str, path: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    /// Chat ids are opaque server strings; encode before embedding in a path.
    fn encode_id(id: &str) -> String {
        String::from(js_sys::encode_uri_component(id))
    }

    pub async fn list_chats(base: &str) -> Result<ChatDirectory> {
        let resp = Client::new()
            .get(Self::endpoint(base, "/list_chats"))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn create_chat(base: &str) -> Result<NewChatResponse> {
        let resp = Client::new()
            .post(Self::endpoint(base, "/new_chat"))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn get_chat(base: &str, id: &str) -> Result<ChatDetail> {
        let path = format!("/get_chat/{}", Self::encode_id(id));
        let resp = Client::new()
            .get(Self::endpoint(base, &path))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn send_message(base: &str, id: &str, message: &str) -> Result<SendMessageResponse> {
        let path = format!("/chat/{}", Self::encode_id(id));
        let resp = Client::new()
            .post(Self::endpoint(base, &path))
            .json(&SendMessageRequest { message: message.to_string() })
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn rename_chat(base: &str, id: &str, title: &str) -> Result<()> {
        let path = format!("/rename_chat/{}", Self::encode_id(id));
        Client::new()
            .post(Self::endpoint(base, &path))
            .json(&RenameChatRequest { title: title.to_string() })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete_chat(base: &str, id: &str) -> Result<()> {
        let path = format!("/delete_chat/{}", Self::encode_id(id));
        Client::new()
            .post(Self::endpoint(base, &path))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
