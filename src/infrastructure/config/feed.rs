//! Exchange feed configuration.

use serde::Deserialize;

/// Hyperliquid feed settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// WebSocket endpoint.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Base URL of public trader profile pages; the address is appended.
    #[serde(default = "default_profile_url")]
    pub profile_url: String,
    /// Submitter roles whose trades are relayed.
    #[serde(default = "default_notify_roles")]
    pub notify_roles: Vec<String>,
}

fn default_ws_url() -> String {
    "wss://api.hyperliquid.xyz/ws".to_string()
}

fn default_profile_url() -> String {
    "https://app.hyperliquid.xyz/trader".to_string()
}

fn default_notify_roles() -> Vec<String> {
    vec!["user".to_string()]
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            profile_url: default_profile_url(),
            notify_roles: default_notify_roles(),
        }
    }
}
