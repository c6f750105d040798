// ABOUTME: Maps toolset - the Google Maps MCP server launched through npx
// ABOUTME: with the API key passed in its environment.

use std::time::Duration;

use crate::mcp::{McpServerConfig, McpToolset};

pub const MAPS_SERVER_PACKAGE: &str = "@modelcontextprotocol/server-google-maps";

/// Environment variable the maps server reads its key from.
pub const MAPS_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

pub fn maps_server(api_key: &str, timeout: Duration) -> McpServerConfig {
    McpServerConfig::new("maps", "npx")
        .args(["-y", MAPS_SERVER_PACKAGE])
        .env(MAPS_API_KEY_ENV, api_key)
        .timeout(timeout)
}

pub fn maps_toolset(api_key: &str, timeout: Duration) -> McpToolset {
    McpToolset::new(maps_server(api_key, timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_injected_into_child_env() {
        let set = maps_toolset("secret-key", Duration::from_secs(30));
        let config = set.config();

        assert_eq!(config.args, vec!["-y", MAPS_SERVER_PACKAGE]);
        assert_eq!(
            config.env.get(MAPS_API_KEY_ENV).map(String::as_str),
            Some("secret-key")
        );
    }
}
