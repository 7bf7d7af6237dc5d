use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use serde::Serialize;

use crate::core::models::{application::Application, event::Event, user::User};
use crate::core::ports::repository::{ApplicationCommon, EventCommon, Store, UserCommon};
use crate::error::Error;

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_faculty: BTreeMap<String, usize>,
    pub by_year: BTreeMap<String, usize>,
    pub by_interest: BTreeMap<String, usize>,
    /// Records whose confirmation mail never went out.
    pub email_pending: usize,
}

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: usize,
    pub by_role: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
}

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub total: usize,
    pub active: usize,
    pub upcoming: usize,
}

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub applications: ApplicationStats,
    pub users: UserStats,
    pub events: EventStats,
}

fn tally<I: IntoIterator<Item = String>>(items: I) -> BTreeMap<String, usize> {
    items.into_iter().counts().into_iter().collect()
}

// free-text buckets are grouped lowercased so "Admin" and "admin" count together
fn bucket(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        "unspecified".into()
    } else {
        s.to_lowercase()
    }
}

pub fn dashboard_stats(applications: &[Application], users: &[User], events: &[Event], today: NaiveDate) -> DashboardStats {
    DashboardStats {
        applications: ApplicationStats {
            total: applications.len(),
            by_status: tally(applications.iter().map(|a| a.status.to_string())),
            by_faculty: tally(applications.iter().map(|a| bucket(&a.faculty))),
            by_year: tally(applications.iter().map(|a| bucket(&a.year))),
            by_interest: tally(applications.iter().flat_map(|a| a.interests.iter().map(|i| bucket(i)))),
            email_pending: applications.iter().filter(|a| !a.is_email_send).count(),
        },
        users: UserStats {
            total: users.len(),
            by_role: tally(users.iter().map(|u| bucket(&u.role))),
            by_status: tally(users.iter().map(|u| bucket(&u.status))),
        },
        events: EventStats {
            total: events.len(),
            active: events.iter().filter(|e| e.is_active).count(),
            upcoming: events.iter().filter(|e| e.is_active && e.event_date >= today).count(),
        },
    }
}

pub async fn collect_stats<S: Store>(store: &S) -> Result<DashboardStats, Error> {
    let applications = ApplicationCommon::all(store).await?;
    let users = UserCommon::all(store).await?;
    let events = EventCommon::all(store).await?;
    Ok(dashboard_stats(&applications, &users, &events, Utc::now().date_naive()))
}
