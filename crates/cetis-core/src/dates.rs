//! Spanish (es-MX) date rendering.
//!
//! chrono's `%B`/`%b` are English-only, so month names come from the tables
//! below.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

pub const NO_DATE: &str = "Sin fecha";

/// Capitalized month name, e.g. `"Agosto"`.
pub fn month_name_es(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// `"Agosto 2025"`.
pub fn month_year_es(date: NaiveDate) -> String {
    format!("{} {}", month_name_es(date), date.year())
}

/// `"15 ago 2022"`, or [`NO_DATE`] when there is no date.
pub fn short_date_es(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!(
            "{:02} {} {}",
            d.day(),
            MONTHS_SHORT[d.month0() as usize],
            d.year()
        ),
        None => NO_DATE.to_string(),
    }
}

/// `"15/08/2022"`.
pub fn day_month_year(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
