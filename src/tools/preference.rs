// ABOUTME: User preference tool - read-modify-write of a map kept in session
// ABOUTME: state. State read and write failures are returned to the caller as errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::context::ToolContext;
use crate::tool::{FunctionTool, Schema, ToolArgs};

/// State key holding the preference map.
pub const USER_PREFERENCES_KEY: &str = "user:preferences";

#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceArgs {
    pub preference: String,
    pub value: String,
}

impl ToolArgs for PreferenceArgs {
    fn schema() -> Value {
        Schema::object()
            .string("preference", "The name of the preference to set.", true)
            .string("value", "The value to set for the preference.", true)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceUpdated {
    pub updated_preference: String,
}

/// Set one preference, keeping the others.
///
/// The whole map is read and written back, so two concurrent updates can
/// lose one of them. A failed read aborts the update; writing back a fresh
/// map would drop every stored preference.
pub async fn update_user_preference(
    ctx: ToolContext,
    args: PreferenceArgs,
) -> anyhow::Result<PreferenceUpdated> {
    let mut preferences = match ctx.state().get(USER_PREFERENCES_KEY).await {
        Ok(Some(Value::Object(map))) => map,
        Ok(Some(other)) => {
            warn!(found = %other, "preferences were not a map, replacing");
            Map::new()
        }
        Ok(None) => Map::new(),
        Err(e) => return Err(e.into()),
    };

    preferences.insert(args.preference.clone(), Value::String(args.value.clone()));
    ctx.state()
        .set(USER_PREFERENCES_KEY, Value::Object(preferences))
        .await?;

    info!(preference = %args.preference, value = %args.value, "updated user preference");
    Ok(PreferenceUpdated {
        updated_preference: args.preference,
    })
}

pub fn update_user_preference_tool() -> FunctionTool<PreferenceArgs> {
    FunctionTool::with_context(
        "update_user_preference",
        "Updates a user-specific preference.",
        update_user_preference,
    )
    .propagate_errors()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::context::{InMemoryArtifacts, InMemoryMemory, InMemoryState, StateStore};
    use crate::error::ContextError;
    use crate::tool::Tool;

    fn args(preference: &str, value: &str) -> serde_json::Value {
        json!({"preference": preference, "value": value})
    }

    #[tokio::test]
    async fn last_write_wins_and_other_keys_survive() {
        let ctx = ToolContext::in_memory("preference_agent");
        let tool = update_user_preference_tool();

        tool.execute(&ctx, args("theme", "dark")).await.unwrap();
        tool.execute(&ctx, args("language", "fr")).await.unwrap();
        let result = tool.execute(&ctx, args("theme", "light")).await.unwrap();

        assert_eq!(result.get_str("updated_preference"), Some("theme"));
        assert_eq!(
            ctx.state().get(USER_PREFERENCES_KEY).await.unwrap(),
            Some(json!({"theme": "light", "language": "fr"}))
        );
    }

    #[tokio::test]
    async fn non_map_value_is_replaced() {
        let ctx = ToolContext::in_memory("preference_agent");
        ctx.state()
            .set(USER_PREFERENCES_KEY, json!("garbage"))
            .await
            .unwrap();

        update_user_preference_tool()
            .execute(&ctx, args("theme", "dark"))
            .await
            .unwrap();

        assert_eq!(
            ctx.state().get(USER_PREFERENCES_KEY).await.unwrap(),
            Some(json!({"theme": "dark"}))
        );
    }

    /// Reads nothing and refuses every write.
    struct ReadOnlyState;

    #[async_trait]
    impl StateStore for ReadOnlyState {
        async fn get(&self, _key: &str) -> Result<Option<Value>, ContextError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: Value) -> Result<(), ContextError> {
            Err(ContextError::State("state is read-only".into()))
        }
    }

    /// Holds a stored map but fails every read.
    struct UnreadableState(InMemoryState);

    #[async_trait]
    impl StateStore for UnreadableState {
        async fn get(&self, _key: &str) -> Result<Option<Value>, ContextError> {
            Err(ContextError::State("connection reset".into()))
        }

        async fn set(&self, key: &str, value: Value) -> Result<(), ContextError> {
            self.0.set(key, value).await
        }
    }

    #[tokio::test]
    async fn read_failure_propagates_and_keeps_stored_map() {
        let inner = InMemoryState::new();
        inner
            .set(USER_PREFERENCES_KEY, json!({"language": "fr", "theme": "dark"}))
            .await
            .unwrap();
        let state = Arc::new(UnreadableState(inner));
        let ctx = ToolContext::new(
            "preference_agent",
            state.clone(),
            Arc::new(InMemoryArtifacts::new()),
            Arc::new(InMemoryMemory::new()),
        );

        let err = update_user_preference_tool()
            .execute(&ctx, args("units", "metric"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(
            state.0.get(USER_PREFERENCES_KEY).await.unwrap(),
            Some(json!({"language": "fr", "theme": "dark"}))
        );
    }

    #[tokio::test]
    async fn write_failure_propagates() {
        let ctx = ToolContext::new(
            "preference_agent",
            Arc::new(ReadOnlyState),
            Arc::new(InMemoryArtifacts::new()),
            Arc::new(InMemoryMemory::new()),
        );

        let err = update_user_preference_tool()
            .execute(&ctx, args("theme", "dark"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }
}
