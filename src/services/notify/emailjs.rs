use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::NotificationProvider;

pub struct EmailJsProvider {
    public_key: String,
    service_id: String,
    client: reqwest::Client,
}

impl EmailJsProvider {
    pub fn new(public_key: String, service_id: String) -> Self {
        Self {
            public_key,
            service_id,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotificationProvider for EmailJsProvider {
    async fn send(&self, template_id: &str, params: &Value) -> anyhow::Result<()> {
        let body = json!({
            "service_id": self.service_id,
            "template_id": template_id,
            "user_id": self.public_key,
            "template_params": params,
        });

        self.client
            .post("https://api.emailjs.com/api/v1.0/email/send")
            .json(&body)
            .send()
            .await
            .context("failed to reach EmailJS")?
            .error_for_status()
            .context("EmailJS API returned error")?;

        Ok(())
    }
}
