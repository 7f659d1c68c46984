//! Flattened student profile and the digital credential built from it.

use cetis_config::InstitutionConfig;
use cetis_core::dates::{month_year_es, short_date_es};
use cetis_models::periods::Period;
use cetis_models::students::{
    StudentCredential, StudentProfile, StudentProfileRow, format_qr_code,
};
use cetis_models::users::join_name_parts;
use chrono::{Datelike, NaiveDate};

pub const NO_NAME: &str = "Sin nombre";
pub const NO_SPECIALTY: &str = "Sin especialidad";
pub const NO_CODE: &str = "N/A";
pub const NO_QR: &str = "Sin QR";

pub fn full_name(first: Option<&str>, paternal: Option<&str>, maternal: Option<&str>) -> String {
    let name = join_name_parts(&[first, paternal, maternal]);
    if name.is_empty() {
        NO_NAME.to_string()
    } else {
        name
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

pub fn profile_from_row(row: &StudentProfileRow) -> StudentProfile {
    StudentProfile {
        id: row.student_id,
        user_id: row.user_id,
        control_number: row.control_number.to_string(),
        full_name: full_name(
            row.first_name.as_deref(),
            row.paternal_surname.as_deref(),
            row.maternal_surname.as_deref(),
        ),
        specialty: or_default(row.specialty_name.as_deref(), NO_SPECIALTY),
        specialty_code: or_default(row.specialty_code.as_deref(), NO_CODE),
        semester: row.semester,
        email: row.email.clone(),
        phone: row.phone.clone(),
        qr_code: or_default(Some(&row.qr_code), NO_QR),
        enrolled_on: row
            .enrolled_on
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| NO_CODE.to_string()),
        curp: row.curp.clone(),
    }
}

/// Text encoded in the credential QR: the control number.
pub fn qr_payload(profile: &StudentProfile) -> String {
    profile.control_number.trim().to_string()
}

/// QR code for a student created without one, with a random suffix.
pub fn generate_qr_code(prefix: &str, control_number: i64, enrolled_on: NaiveDate) -> String {
    format_qr_code(prefix, control_number, enrolled_on.year(), rand::random())
}

pub fn build_credential(
    row: &StudentProfileRow,
    active_period: Option<&Period>,
    institution: &InstitutionConfig,
) -> StudentCredential {
    let profile = profile_from_row(row);

    StudentCredential {
        qr_payload: qr_payload(&profile),
        enrolled_on_display: short_date_es(row.enrolled_on),
        issued_on: active_period.map(|p| month_year_es(p.start_date)),
        valid_until: active_period.map(|p| month_year_es(p.end_date)),
        institution: institution.name.clone(),
        profile,
    }
}
