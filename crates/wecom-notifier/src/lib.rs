//! WeChat Work (企业微信) group-robot webhook delivery.
//!
//! File delivery is a two-step protocol: upload the file to the robot's
//! `upload_media` endpoint for a `media_id`, then send a file message
//! referencing it. The webhook reports outcomes in an `{errcode, errmsg}`
//! envelope; a non-zero errcode is a failure even when the HTTP call
//! succeeded.

use chrono::Local;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("webhook rejected call: errcode {errcode}: {errmsg}")]
    Api { errcode: i64, errmsg: String },
    #[error("upload succeeded but no media_id was returned")]
    MissingMediaId,
}

/// Run status reported in the text notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Success => write!(f, "成功"),
            RunStatus::Failure => write!(f, "失败"),
        }
    }
}

/// Webhook response envelope shared by all robot endpoints.
#[derive(Debug, Deserialize)]
struct WecomResponse {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
    #[serde(default)]
    media_id: Option<String>,
}

impl WecomResponse {
    fn into_result(self) -> Result<Option<String>, NotifyError> {
        if self.errcode != 0 {
            return Err(NotifyError::Api { errcode: self.errcode, errmsg: self.errmsg });
        }
        Ok(self.media_id)
    }
}

/// Delivery collaborator for one robot webhook.
#[derive(Clone)]
pub struct WecomNotifier {
    webhook_url: String,
    client: Client,
}

impl WecomNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self { webhook_url, client: Client::new() }
    }

    /// Deliver one artifact file: upload for a media_id, then send it.
    pub async fn send_file(&self, path: &Path) -> Result<(), NotifyError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());

        let form = Form::new().part("media", Part::bytes(bytes).file_name(file_name));
        let upload: WecomResponse = self
            .client
            .post(upload_media_url(&self.webhook_url))
            .query(&[("type", "file")])
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        let media_id = upload.into_result()?.ok_or(NotifyError::MissingMediaId)?;

        let send: WecomResponse = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({
                "msgtype": "file",
                "file": { "media_id": media_id }
            }))
            .send()
            .await?
            .json()
            .await?;
        send.into_result()?;

        tracing::info!("文件发送成功: {}", path.display());
        Ok(())
    }

    /// Post a run-status text notification.
    pub async fn send_status(&self, status: RunStatus, message: &str) -> Result<(), NotifyError> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let content = status_content(status, &timestamp, message);

        let response: WecomResponse = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({
                "msgtype": "text",
                "text": { "content": content }
            }))
            .send()
            .await?
            .json()
            .await?;
        response.into_result()?;

        tracing::info!("状态通知发送成功");
        Ok(())
    }
}

/// The robot's media-upload endpoint shares the webhook URL with the final
/// path segment swapped.
fn upload_media_url(webhook_url: &str) -> String {
    webhook_url.replace("/send", "/upload_media")
}

fn status_content(status: RunStatus, timestamp: &str, message: &str) -> String {
    format!(
        "【并购重组报告定时任务】\n状态: {}\n时间: {}\n详情: {}",
        status, timestamp, message
    )
}
