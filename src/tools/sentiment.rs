// ABOUTME: Keyword-based sentiment tool used alongside the weather report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tool::{FunctionTool, Outcome, Schema, ToolArgs};

#[derive(Debug, Clone, Deserialize)]
pub struct TextArgs {
    pub text: String,
}

impl ToolArgs for TextArgs {
    fn schema() -> Value {
        Schema::object()
            .string("text", "The text to analyze the sentiment of.", true)
            .build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
}

pub fn analyze_sentiment(args: TextArgs) -> Outcome<SentimentReport> {
    let sentiment = if args.text.contains("cloudy") || args.text.contains("rain") {
        Sentiment::Negative
    } else if args.text.contains("sunny") {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    };
    Outcome::Success(SentimentReport { sentiment })
}

pub fn analyze_sentiment_tool() -> FunctionTool<TextArgs> {
    FunctionTool::new(
        "analyze_sentiment",
        "Analyzes the sentiment of a given text.",
        analyze_sentiment,
    )
}
