//! Webhook contracts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ContractError, Empty, IdParams, Request, Response};

/// A configured webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Event names, e.g. `entry.create`.
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default = "enabled")]
    pub is_enabled: bool,
}

fn enabled() -> bool {
    true
}

/// Partial webhook for updates; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

impl WebhookUpdate {
    /// Apply the set fields to `webhook`.
    pub fn apply_to(&self, webhook: &mut Webhook) {
        if let Some(name) = &self.name {
            webhook.name.clone_from(name);
        }
        if let Some(url) = &self.url {
            webhook.url.clone_from(url);
        }
        if let Some(headers) = &self.headers {
            webhook.headers.clone_from(headers);
        }
        if let Some(events) = &self.events {
            webhook.events.clone_from(events);
        }
        if let Some(is_enabled) = self.is_enabled {
            webhook.is_enabled = is_enabled;
        }
    }
}

/// `GET /webhooks`
pub mod get_webhooks {
    use super::*;

    pub type Request = super::Request;
    pub type Response = super::Response<Vec<Webhook>>;
}

/// `GET /webhooks/:id`
pub mod get_webhook {
    use super::*;

    pub type Request = super::Request;
    pub type Params = IdParams;
    pub type Response = super::Response<Webhook>;
}

/// `POST /webhooks`
pub mod create_webhook {
    use super::*;

    pub type Request = super::Request<Webhook>;
    pub type Response = super::Response<Webhook, Empty, ContractError>;
}

/// `PUT /webhooks/:id`
pub mod update_webhook {
    use super::*;

    pub type Request = super::Request<WebhookUpdate>;
    pub type Params = IdParams;
    pub type Response = super::Response<Webhook, Empty, ContractError>;
}

/// `DELETE /webhooks/:id`
pub mod delete_webhook {
    use super::*;

    pub type Request = super::Request;
    pub type Params = IdParams;
    pub type Response = super::Response<Webhook>;
}

/// `POST /webhooks/batch-delete`
pub mod delete_webhooks {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Body {
        pub ids: Vec<String>,
    }

    pub type Request = super::Request<Body>;
    pub type Response = super::Response<Empty>;
}

/// `POST /webhooks/:id/trigger`
pub mod trigger_webhook {
    use super::*;

    /// Outcome of the test delivery.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Delivery {
        pub status_code: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub message: Option<String>,
    }

    pub type Request = super::Request;
    pub type Params = IdParams;
    pub type Response = super::Response<Delivery>;
}
