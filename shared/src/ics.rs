//! Lenient iCalendar (ICS) event extraction.
//!
//! Only `DTSTART`, `DTEND` and `SUMMARY` are read. Malformed input never
//! fails: blocks without both dates are dropped and dates that do not match a
//! known shape are passed through untouched.

use crate::models::CalendarEvent;

const BEGIN_VEVENT: &str = "BEGIN:VEVENT";
const END_VEVENT: &str = "END:VEVENT";

/// Parse raw ICS text into events, in source order.
///
/// Blocks are delimited by `BEGIN:VEVENT` only. Each block is cut at its first
/// `END:VEVENT`, so an unterminated event runs to the end of the text.
pub fn parse_ics(text: &str) -> Vec<CalendarEvent> {
    text.split(BEGIN_VEVENT)
        .skip(1)
        .filter_map(parse_event_block)
        .collect()
}

fn parse_event_block(block: &str) -> Option<CalendarEvent> {
    let body = match block.find(END_VEVENT) {
        Some(end) => &block[..end],
        None => block,
    };

    let mut start = None;
    let mut end = None;
    let mut summary = None;

    // last occurrence wins
    for line in body.lines() {
        if line.starts_with("DTSTART") {
            if let Some(value) = property_value(line) {
                start = Some(normalize_date(value));
            }
        } else if line.starts_with("DTEND") {
            if let Some(value) = property_value(line) {
                end = Some(normalize_date(value));
            }
        } else if line.starts_with("SUMMARY") {
            if let Some(value) = property_value(line) {
                summary = Some(value.to_string());
            }
        }
    }

    Some(CalendarEvent {
        start: start?,
        end: end?,
        summary,
    })
}

/// Value after the first colon, so `DTSTART;TZID=Europe/Paris:...` parameters are skipped.
fn property_value(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, value)| value.trim())
}

/// Normalize an ICS date or date-time into an ISO-8601-like string.
///
/// - `YYYYMMDD` becomes `YYYY-MM-DDT00:00:00`
/// - `YYYYMMDDTHHMMSSZ` becomes `YYYY-MM-DDTHH:MM:SSZ`
/// - `YYYYMMDDTHHMMSS` becomes `YYYY-MM-DDTHH:MM:SS`
///
/// Anything else is returned unchanged.
pub fn normalize_date(value: &str) -> String {
    let bytes = value.as_bytes();

    match bytes.len() {
        8 if all_digits(bytes) => {
            format!("{}-{}-{}T00:00:00", &value[0..4], &value[4..6], &value[6..8])
        }
        15 if is_date_time(bytes) => format_date_time(value, ""),
        16 if bytes[15] == b'Z' && is_date_time(&bytes[..15]) => format_date_time(value, "Z"),
        _ => value.to_string(),
    }
}

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

// Shape `DDDDDDDDTDDDDDD`
fn is_date_time(bytes: &[u8]) -> bool {
    bytes.len() == 15 && all_digits(&bytes[..8]) && bytes[8] == b'T' && all_digits(&bytes[9..])
}

fn format_date_time(value: &str, suffix: &str) -> String {
    format!(
        "{}-{}-{}T{}:{}:{}{}",
        &value[0..4],
        &value[4..6],
        &value[6..8],
        &value[9..11],
        &value[11..13],
        &value[13..15],
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: &str, end: &str, summary: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            start: start.to_string(),
            end: end.to_string(),
            summary: summary.map(String::from),
        }
    }

    #[test]
    fn test_normalize_date_only() {
        assert_eq!(normalize_date("20250101"), "2025-01-01T00:00:00");
    }

    #[test]
    fn test_normalize_utc_date_time() {
        assert_eq!(normalize_date("20250101T140000Z"), "2025-01-01T14:00:00Z");
    }

    #[test]
    fn test_normalize_floating_date_time() {
        assert_eq!(normalize_date("20250103T100000"), "2025-01-03T10:00:00");
    }

    #[test]
    fn test_normalize_passes_through_unknown_shapes() {
        for raw in [
            "",
            "2025-01-01",
            "202501011",
            "2025010",
            "20250101T1400",
            "20250101T140000ZZ",
            "20250101X140000",
            "2025010aT140000Z",
            "20250101T140000+0100",
            "２０２５０１０１",
        ] {
            assert_eq!(normalize_date(raw), raw, "expected pass-through for {:?}", raw);
        }
    }

    #[test]
    fn test_no_events() {
        assert!(parse_ics("").is_empty());
        assert!(parse_ics("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n").is_empty());
        assert!(parse_ics("DTSTART:20250101\nDTEND:20250102\n").is_empty());
    }

    #[test]
    fn test_parse_all_day_event() {
        let ics = "BEGIN:VCALENDAR\r\n\
                   PRODID:-//Airbnb Inc//Hosting Calendar 1.0//EN\r\n\
                   BEGIN:VEVENT\r\n\
                   DTSTART;VALUE=DATE:20250101\r\n\
                   DTEND;VALUE=DATE:20250103\r\n\
                   SUMMARY:Stay\r\n\
                   UID:abc@airbnb.com\r\n\
                   END:VEVENT\r\n\
                   END:VCALENDAR\r\n";

        assert_eq!(
            parse_ics(ics),
            vec![event("2025-01-01T00:00:00", "2025-01-03T00:00:00", Some("Stay"))]
        );
    }

    #[test]
    fn test_parse_utc_event_without_summary() {
        let ics = "BEGIN:VEVENT\nDTSTART:20250101T140000Z\nDTEND:20250103T100000Z\nEND:VEVENT\n";

        assert_eq!(
            parse_ics(ics),
            vec![event("2025-01-01T14:00:00Z", "2025-01-03T10:00:00Z", None)]
        );
    }

    #[test]
    fn test_block_missing_end_is_dropped() {
        let ics = "BEGIN:VEVENT\nDTSTART:20250101\nDTEND:20250102\nSUMMARY:First\nEND:VEVENT\n\
                   BEGIN:VEVENT\nDTSTART:20250105\nSUMMARY:No end\nEND:VEVENT\n\
                   BEGIN:VEVENT\nDTSTART:20250110\nDTEND:20250112\nSUMMARY:Third\nEND:VEVENT\n";

        let events = parse_ics(ics);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary.as_deref(), Some("First"));
        assert_eq!(events[1].summary.as_deref(), Some("Third"));
    }

    #[test]
    fn test_last_property_wins() {
        let ics = "BEGIN:VEVENT\nSUMMARY:Reserved\nDTSTART:20250101\nDTSTART:20250102\n\
                   DTEND:20250104\nSUMMARY:Airbnb (Not available)\nEND:VEVENT";

        assert_eq!(
            parse_ics(ics),
            vec![event(
                "2025-01-02T00:00:00",
                "2025-01-04T00:00:00",
                Some("Airbnb (Not available)")
            )]
        );
    }

    #[test]
    fn test_value_is_everything_after_first_colon() {
        let ics = "BEGIN:VEVENT\n\
                   DTSTART;TZID=Australia/Sydney:20250101T150000\n\
                   DTEND;TZID=Australia/Sydney:20250105T100000\n\
                   SUMMARY:  Guest: Jane (3 nights)  \n\
                   END:VEVENT";

        assert_eq!(
            parse_ics(ics),
            vec![event(
                "2025-01-01T15:00:00",
                "2025-01-05T10:00:00",
                Some("Guest: Jane (3 nights)")
            )]
        );
    }

    #[test]
    fn test_malformed_dates_pass_through() {
        let ics = "BEGIN:VEVENT\nDTSTART:2025-01-01\nDTEND:tomorrow\nEND:VEVENT";

        assert_eq!(parse_ics(ics), vec![event("2025-01-01", "tomorrow", None)]);
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let ics = "BEGIN:VEVENT\nDTSTART:20250101\nDTEND:20250102\nDTEND\nSUMMARY\nEND:VEVENT";

        assert_eq!(
            parse_ics(ics),
            vec![event("2025-01-01T00:00:00", "2025-01-02T00:00:00", None)]
        );
    }

    #[test]
    fn test_content_after_end_vevent_is_ignored() {
        let ics = "BEGIN:VEVENT\nDTSTART:20250101\nEND:VEVENT\nDTEND:20250102\n";

        assert!(parse_ics(ics).is_empty());
    }

    #[test]
    fn test_unterminated_block_runs_to_end_of_text() {
        let ics = "BEGIN:VEVENT\nDTSTART:20250101\nDTEND:20250102\nSUMMARY:Open";

        assert_eq!(
            parse_ics(ics),
            vec![event("2025-01-01T00:00:00", "2025-01-02T00:00:00", Some("Open"))]
        );
    }

    #[test]
    fn test_nested_begin_splits_blocks() {
        // The second BEGIN starts a new block; the first one has no DTEND left.
        let ics = "BEGIN:VEVENT\nDTSTART:20250101\n\
                   BEGIN:VEVENT\nDTSTART:20250201\nDTEND:20250202\nEND:VEVENT\n\
                   DTEND:20250103\nEND:VEVENT";

        assert_eq!(
            parse_ics(ics),
            vec![event("2025-02-01T00:00:00", "2025-02-02T00:00:00", None)]
        );
    }

    #[test]
    fn test_events_keep_source_order() {
        let ics = "BEGIN:VEVENT\nDTSTART:20250301\nDTEND:20250302\nEND:VEVENT\n\
                   BEGIN:VEVENT\nDTSTART:20250101\nDTEND:20250102\nEND:VEVENT\n";

        let starts: Vec<_> = parse_ics(ics).into_iter().map(|e| e.start).collect();
        assert_eq!(starts, vec!["2025-03-01T00:00:00", "2025-01-01T00:00:00"]);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let ics = "BEGIN:VEVENT\nDTSTART:20250101\nDTEND:20250102\nSUMMARY:Stay\nEND:VEVENT";

        assert_eq!(parse_ics(ics), parse_ics(ics));
    }
}
