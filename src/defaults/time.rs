//! Date/time defaults. Every value is formatted once from the clock captured
//! at registry construction, so samples stay consistent within a run.
use chrono::{DateTime, Datelike, Local, SecondsFormat};
use serde_json::{json, Value};
use super::ScalarDefaults;

const DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";
const DATE: &str = "%Y-%m-%d";
const TIME: &str = "%H:%M:%S";

pub(super) fn register(reg: &mut ScalarDefaults, now: DateTime<Local>) {
    let date_time = Value::from(now.format(DATE_TIME).to_string());
    let date = Value::from(now.format(DATE).to_string());
    let time = Value::from(now.format(TIME).to_string());
    let instant = Value::from(now.to_rfc3339_opts(SecondsFormat::Secs, false));

    for name in ["java.util.Date", "java.sql.Timestamp", "java.time.LocalDateTime"] {
        reg.register(name, date_time.clone());
    }
    for name in ["java.time.LocalDate", "java.sql.Date"] {
        reg.register(name, date.clone());
    }
    for name in ["java.time.LocalTime", "java.sql.Time"] {
        reg.register(name, time.clone());
    }
    for name in ["java.time.Instant", "java.time.OffsetDateTime", "java.time.ZonedDateTime"] {
        reg.register(name, instant.clone());
    }
    reg.register("java.time.Year", json!(now.year()));
    reg.register("java.time.Duration", json!("PT0S"));
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use super::*;

    #[test]
    fn offsets_are_rendered_for_instants() {
        let now = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let reg = ScalarDefaults::at(now);
        let instant = reg.lookup("java.time.Instant").unwrap();
        let text = instant.as_str().unwrap();
        assert!(text.starts_with("2024-01-02T03:04:05"), "{text}");
        assert_eq!(reg.lookup("java.time.Year"), Some(json!(2024)));
        assert_eq!(reg.lookup("java.sql.Time"), Some(json!("03:04:05")));
    }
}
