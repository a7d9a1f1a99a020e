//! Recent-replies proxy for the authenticated Threads user.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::oauth::ThreadsClient;
use crate::types::AccessToken;

/// Upper bound on the replies request.
pub const REPLIES_TIMEOUT: Duration = Duration::from_secs(10);

/// Default and maximum page sizes accepted by the proxy routes.
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

const REPLY_FIELDS: &str = "id,media_product_type,media_type,media_url,permalink,username,text,\
topic_tag,timestamp,shortcode,thumbnail_url,children,is_quote_post,has_replies,root_post,\
replied_to,is_reply,is_reply_owned_by_me,reply_audience";

/// One entry of the replies endpoint `data` array.
///
/// Only the fields the proxy reshapes are decoded; the rest are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Reply {
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Case-insensitive substring match. `keyword` must already be lowercased and trimmed;
    /// an empty keyword matches everything.
    #[must_use]
    pub fn matches(&self, keyword: &str) -> bool {
        keyword.is_empty() || self.text().to_lowercase().contains(keyword)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RepliesPage {
    #[serde(default)]
    data: Vec<Reply>,
}

/// Front-end shape of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplySummary {
    pub media_id: String,
    pub text: String,
    pub preview: String,
    pub permalink: String,
    pub timestamp: String,
    pub username: String,
}

impl From<Reply> for ReplySummary {
    fn from(reply: Reply) -> Self {
        let text = reply.text.unwrap_or_default();
        Self {
            media_id: reply.id.unwrap_or_default(),
            preview: preview(&text),
            text,
            permalink: reply.permalink.unwrap_or_default(),
            timestamp: reply.timestamp.unwrap_or_default(),
            username: reply.username.unwrap_or_default(),
        }
    }
}

/// First five whitespace-separated words.
#[must_use]
pub fn preview(text: &str) -> String {
    text.split_whitespace().take(5).collect::<Vec<_>>().join(" ")
}

/// Keep replies whose text contains `keywords`, ignoring case and surrounding whitespace.
#[must_use]
pub fn filter_replies(replies: Vec<Reply>, keywords: &str) -> Vec<Reply> {
    let keyword = keywords.trim().to_lowercase();
    replies.into_iter().filter(|r| r.matches(&keyword)).collect()
}

impl ThreadsClient {
    /// Fetch the user's most recent replies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] if the API answers with a status of 400 or above,
    /// or [`Error::Http`] on network failure, timeout, or an undecodable body.
    pub async fn fetch_replies(
        &self,
        access_token: &AccessToken,
        limit: u32,
    ) -> Result<Vec<Reply>, Error> {
        let limit = limit.to_string();
        let params = [
            ("fields", REPLY_FIELDS),
            ("limit", limit.as_str()),
            ("access_token", access_token.as_str()),
        ];

        let response = self
            .http()
            .get(self.config().replies_url().clone())
            .query(&params)
            .timeout(REPLIES_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let page = response.json::<RepliesPage>().await?;
        Ok(page.data)
    }
}
