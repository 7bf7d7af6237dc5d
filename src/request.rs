use serde::Deserialize;

use crate::core::models::{
    application::{ApplicationFilter, ApplicationStatus},
    common::SortOrder,
    event::{EventFilter, EventWindow},
    user::UserFilter,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityParams {
    pub email: Option<String>,
    pub student_index_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListParams {
    pub search: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub faculty: Option<String>,
    pub year: Option<String>,
    pub sort: Option<SortOrder>,
}

impl From<ApplicationListParams> for ApplicationFilter {
    fn from(p: ApplicationListParams) -> Self {
        ApplicationFilter {
            search: p.search,
            status: p.status,
            faculty: p.faculty,
            year: p.year,
            sort: p.sort.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub search: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub sort: Option<SortOrder>,
}

impl From<UserListParams> for UserFilter {
    fn from(p: UserListParams) -> Self {
        UserFilter {
            search: p.search,
            role: p.role,
            status: p.status,
            sort: p.sort.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListParams {
    pub when: Option<EventWindow>,
    pub event_type: Option<String>,
}

impl EventListParams {
    pub fn into_filter(self, include_inactive: bool) -> EventFilter {
        EventFilter {
            window: self.when.unwrap_or(if include_inactive { EventWindow::All } else { EventWindow::Upcoming }),
            event_type: self.event_type,
            include_inactive,
        }
    }
}
