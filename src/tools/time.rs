// ABOUTME: Current-time tool - resolves a city to an IANA time zone and
// ABOUTME: reports the local wall-clock time there.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::CityArgs;
use crate::tool::{FunctionTool, Outcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeReport {
    pub report: String,
    pub timezone: String,
}

/// Treat the city as a zone name with spaces as underscores, falling back to
/// the cities we know by name.
pub fn resolve_timezone(city: &str) -> Option<Tz> {
    city.replace(' ', "_").parse::<Tz>().ok().or_else(|| {
        city.eq_ignore_ascii_case("new york")
            .then_some(chrono_tz::America::New_York)
    })
}

/// The time in `city` at the instant `now`.
pub fn time_in_city(city: &str, now: DateTime<Utc>) -> Outcome<TimeReport> {
    match resolve_timezone(city) {
        Some(tz) => {
            let local = now.with_timezone(&tz);
            Outcome::Success(TimeReport {
                report: format!(
                    "The current time in {} is {}",
                    city,
                    local.format("%Y-%m-%d %H:%M:%S %Z")
                ),
                timezone: tz.name().to_string(),
            })
        }
        None => Outcome::error(format!(
            "Sorry, I don't have timezone information for {}.",
            city
        )),
    }
}

pub fn get_current_time(args: CityArgs) -> Outcome<TimeReport> {
    time_in_city(&args.city, Utc::now())
}

pub fn get_current_time_tool() -> FunctionTool<CityArgs> {
    FunctionTool::new(
        "get_current_time",
        "Returns the current time in a specified city.",
        get_current_time,
    )
}
