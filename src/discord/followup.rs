use reqwest::Client;

use crate::{Res, config::DiscordSettings, types::FollowupMessage};

/// Edits the original (deferred) interaction response.
#[derive(Debug, Clone)]
pub struct Followup {
    http: Client,
    api_url: String,
    application_id: String,
    bot_token: String,
}

impl Followup {
    pub fn new(http: Client, settings: &DiscordSettings) -> Self {
        Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            application_id: settings.application_id.clone(),
            bot_token: settings.bot_token.clone(),
        }
    }

    /// `PATCH /webhooks/{application_id}/{interaction_token}/messages/@original`
    pub async fn edit_original(&self, interaction_token: &str, content: &str) -> Res<()> {
        let url = format!(
            "{}/webhooks/{}/{}/messages/@original",
            self.api_url, self.application_id, interaction_token
        );

        self.http
            .patch(&url)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&FollowupMessage {
                content: content.to_string(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
