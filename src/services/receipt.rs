use crate::models::Booking;
use crate::services::pricing::{format_date, format_rupees, format_time_range};

/// Printable receipt for a stored booking.
pub fn render_receipt(booking: &Booking) -> String {
    let rows = [
        ("Booking ID", booking.id.clone()),
        ("Studio", booking.studio_name.clone()),
        ("Date", format_date(booking.date)),
        ("Time", format_time_range(booking.start_time, booking.duration_hours)),
        ("Duration", format!("{} hours", booking.duration_hours)),
        ("Purpose", booking.purpose.clone()),
        ("Rate", format!("{}/hour", format_rupees(u64::from(booking.hourly_rate)))),
    ];

    let mut out = String::from("TuneSpace Booking Receipt\n");
    out.push_str(&"-".repeat(40));
    out.push('\n');
    for (label, value) in rows {
        out.push_str(&format!("{label:<12}{value}\n"));
    }
    out.push_str(&"-".repeat(40));
    out.push('\n');
    out.push_str(&format!("{:<12}{}\n", "Total", format_rupees(booking.total_cost)));
    out.push_str("\nThank you for booking with TuneSpace!\n");
    out
}
