// ABOUTME: Weather lookup tools backed by fixed reports for a few cities.
// ABOUTME: Unknown cities come back as status="error" results, not failures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tool::{FunctionTool, Outcome, Schema, ToolArgs};

/// Arguments for tools keyed by a city name.
#[derive(Debug, Clone, Deserialize)]
pub struct CityArgs {
    pub city: String,
}

impl ToolArgs for CityArgs {
    fn schema() -> Value {
        Schema::object()
            .string("city", "The name of the city.", true)
            .build()
    }
}

/// A human-readable report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub report: String,
}

impl Report {
    pub fn new(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
        }
    }
}

fn not_available(city: &str) -> Outcome<Report> {
    Outcome::error(format!("Weather information for '{}' is not available.", city))
}

/// Weather for a city. Only New York has data.
pub fn get_weather(args: CityArgs) -> Outcome<Report> {
    if args.city.to_lowercase() == "new york" {
        Outcome::Success(Report::new(
            "The weather in New York is sunny with a temperature of 25 degrees Celsius (77 degrees Fahrenheit).",
        ))
    } else {
        not_available(&args.city)
    }
}

/// Weather for any city name mentioning London or Paris.
pub fn get_weather_report(args: CityArgs) -> Outcome<Report> {
    let city = args.city.to_lowercase();
    if city.contains("london") {
        Outcome::Success(Report::new(
            "The current weather in London is cloudy with a temperature of 18 degrees Celsius and a chance of rain.",
        ))
    } else if city.contains("paris") {
        Outcome::Success(Report::new(
            "The weather in Paris is sunny with a temperature of 25 degrees Celsius.",
        ))
    } else {
        not_available(&args.city)
    }
}

pub fn get_weather_tool() -> FunctionTool<CityArgs> {
    FunctionTool::new(
        "get_weather",
        "Retrieves the current weather report for a specified city.",
        get_weather,
    )
}

pub fn get_weather_report_tool() -> FunctionTool<CityArgs> {
    FunctionTool::new(
        "get_weather_report",
        "Retrieves the current weather report for a specified city.",
        get_weather_report,
    )
}
