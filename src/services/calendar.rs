use crate::models::Booking;

/// iCalendar export of a booking. The event end is computed on the calendar,
/// so sessions past midnight end on the following day. `None` if the end
/// cannot be represented.
pub fn generate_ics(booking: &Booking) -> Option<String> {
    let (start, end) = booking.slot().interval()?;
    let dtstart = start.format("%Y%m%dT%H%M%S").to_string();
    let dtend = end.format("%Y%m%dT%H%M%S").to_string();
    let dtstamp = booking.created_at.format("%Y%m%dT%H%M%SZ").to_string();
    let uid = format!("{}@tunespace", booking.id);
    let summary = format!("{} session at TuneSpace", booking.studio_name);
    let description = escape_text(&booking.purpose);

    Some(format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//TuneSpace//Studio Booking//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    ))
}

fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}
