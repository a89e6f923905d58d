//! Clock and date display helpers.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Current Unix time in whole seconds.
#[must_use]
pub fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Render an account creation timestamp as e.g. `March 5, 2024`.
#[must_use]
pub fn member_since(created_at: Option<&str>) -> Option<String> {
    let parsed = OffsetDateTime::parse(created_at?.trim(), &Rfc3339).ok()?;
    parsed
        .format(format_description!("[month repr:long] [day padding:none], [year]"))
        .ok()
}
