//! Plain-text rendering of the dashboard and message list.

use std::fmt::Write as _;

use crate::models::{AppointmentRecord, AppointmentStatus, Identity, MessageRecord};

pub const NO_APPOINTMENTS: &str = "No Appointments Found!";
pub const NO_MESSAGES: &str = "No Messages Found";

const HEADERS: [&str; 6] = ["Patient", "Date", "Doctor", "Department", "Status", "Visited"];

fn status_cell(rec: &AppointmentRecord, pending: Option<AppointmentStatus>) -> String {
    match pending {
        Some(requested) if requested != rec.status => {
            format!("{} (updating to {})", rec.status, requested)
        }
        Some(_) => format!("{} (updating)", rec.status),
        None => rec.status.to_string(),
    }
}

fn row(rec: &AppointmentRecord, pending: Option<AppointmentStatus>) -> [String; 6] {
    [
        rec.patient_name(),
        rec.display_date().to_string(),
        rec.doctor_name(),
        rec.department.clone(),
        status_cell(rec, pending),
        if rec.has_visited { "yes" } else { "no" }.to_string(),
    ]
}

/// Greeting banner, total count and the appointments table (or the empty state).
pub fn render_dashboard<'a, I, P>(admin: Option<&Identity>, records: I, pending: P) -> String
where
    I: IntoIterator<Item = &'a AppointmentRecord>,
    P: Fn(&str) -> Option<AppointmentStatus>,
{
    let rows: Vec<[String; 6]> = records
        .into_iter()
        .map(|rec| row(rec, pending(rec.id.as_str())))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "Hello, {}", admin.map(Identity::display_name).unwrap_or_default());
    let _ = writeln!(out, "Total Appointments: {}", rows.len());
    out.push('\n');
    out.push_str("Appointments\n");

    if rows.is_empty() {
        out.push_str(NO_APPOINTMENTS);
        out.push('\n');
        return out;
    }

    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header = HEADERS.map(str::to_string);
    push_line(&mut out, &header, &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_line(&mut out, &rule, &widths);
    for r in &rows {
        push_line(&mut out, r, &widths);
    }

    let options: Vec<&str> = AppointmentStatus::ALL.iter().map(|s| s.as_str()).collect();
    let _ = writeln!(out, "\nStatus options: {}", options.join(", "));
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

pub fn render_messages(messages: &[MessageRecord]) -> String {
    let mut out = String::from("MESSAGES\n");
    if messages.is_empty() {
        out.push_str(NO_MESSAGES);
        out.push('\n');
        return out;
    }
    for m in messages {
        let _ = writeln!(out, "\nFirst Name: {}", m.first_name);
        let _ = writeln!(out, "Last Name: {}", m.last_name);
        let _ = writeln!(out, "Email: {}", m.email);
        let _ = writeln!(out, "Phone: {}", m.phone);
        let _ = writeln!(out, "Message: {}", m.message);
    }
    out
}
