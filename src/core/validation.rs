//! Join-form and dashboard-form checks. Pure functions; the uniqueness scan
//! lives in `services::intake` because it needs the store.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::application::{ApplicationForm, ApplicationInsert, ApplicationStatus};
use crate::error::{Error, FieldErrors};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// Throwaway mail providers refused by the join form. Subdomains match too.
pub const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "dispostable.com",
    "emailondeck.com",
    "fakeinbox.com",
    "getnada.com",
    "guerrillamail.com",
    "maildrop.cc",
    "mailinator.com",
    "mintemail.com",
    "mohmal.com",
    "sharklasers.com",
    "temp-mail.org",
    "tempmail.com",
    "throwawaymail.com",
    "trashmail.com",
    "yopmail.com",
];

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_disposable_email(email: &str) -> bool {
    let domain = match email.rsplit_once('@') {
        Some((_, domain)) => domain.trim().to_lowercase(),
        None => return false,
    };
    DISPOSABLE_DOMAINS
        .iter()
        .any(|d| domain == *d || domain.strip_suffix(d).map_or(false, |rest| rest.ends_with('.')))
}

/// Collects field errors; `finish` turns a non-empty set into `Error::Validation`.
#[derive(Debug, Default)]
pub struct Checker {
    errors: FieldErrors,
}

impl Checker {
    pub fn required(&mut self, field: &str, label: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, &format!("{} is required", label));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if value.is_empty() {
            self.fail(field, "Email is required");
        } else if !is_valid_email(value) {
            self.fail(field, "Please enter a valid email address");
        } else if is_disposable_email(value) {
            self.fail(field, "Disposable email addresses are not allowed");
        }
        self
    }

    pub fn fail(&mut self, field: &str, message: &str) -> &mut Self {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
        self
    }

    pub fn finish(&mut self) -> Result<(), Error> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(Error::Validation(std::mem::take(&mut self.errors)))
    }
}

/// Trims, drops blanks and repeats, keeping first-seen order.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !out.iter().any(|o| o.eq_ignore_ascii_case(item)) {
            out.push(item.to_owned());
        }
    }
    out
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates a join form and produces the record to insert, stamped now and pending.
pub fn validate_application(form: ApplicationForm) -> Result<ApplicationInsert, Error> {
    Checker::default()
        .required("name", "Name", &form.name)
        .email("email", &form.email)
        .required("studentIndexId", "Student index ID", &form.student_index_id)
        .required("faculty", "Faculty", &form.faculty)
        .required("year", "Year", &form.year)
        .finish()?;
    Ok(ApplicationInsert {
        name: form.name.trim().to_owned(),
        email: normalize_email(&form.email),
        student_index_id: form.student_index_id.trim().to_owned(),
        faculty: form.faculty.trim().to_owned(),
        year: form.year.trim().to_owned(),
        interests: clean_list(form.interests),
        message: form.message.trim().to_owned(),
        timestamp: Utc::now(),
        status: ApplicationStatus::Pending,
        is_email_send: false,
    })
}
