//! Test doubles: an in-memory record store, a recording mailer and a fake image host.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::core::models::application::{Application, ApplicationForm, ApplicationInsert, ApplicationStatus};
use crate::core::models::common::eq_ci;
use crate::core::models::event::{Event, EventForm, EventInsert};
use crate::core::models::user::{User, UserForm, UserInsert};
use crate::core::models::UploadedFileCreate;
use crate::core::ports::image_host::ImageHost;
use crate::core::ports::mailer::{Mail, Mailer};
use crate::core::ports::repository::{ApplicationCommon, EventCommon, SettingCommon, UserCommon};
use crate::core::services::notification::NotifyConfig;
use crate::error::{Error, FieldErrors};

#[derive(Default)]
pub struct MemoryStore {
    applications: Mutex<Vec<Application>>,
    users: Mutex<Vec<User>>,
    events: Mutex<Vec<Event>>,
    settings: Mutex<HashMap<String, String>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn application_conflicts(list: &[Application], candidate: &Application) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for a in list.iter().filter(|a| a.id != candidate.id) {
        if eq_ci(&a.email, &candidate.email) {
            fields.insert("email".into(), "email already exists".into());
        }
        if eq_ci(&a.student_index_id, &candidate.student_index_id) {
            fields.insert("studentIndexId".into(), "student index id already exists".into());
        }
    }
    fields
}

impl ApplicationCommon for MemoryStore {
    async fn insert(&self, data: ApplicationInsert) -> Result<Application, Error> {
        let application = Application {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            email: data.email,
            student_index_id: data.student_index_id,
            faculty: data.faculty,
            year: data.year,
            interests: data.interests,
            message: data.message,
            timestamp: data.timestamp,
            status: data.status,
            is_email_send: data.is_email_send,
        };
        let mut list = lock(&self.applications);
        let conflicts = application_conflicts(&list, &application);
        if !conflicts.is_empty() {
            return Err(Error::Duplicate(conflicts));
        }
        list.push(application.clone());
        Ok(application)
    }

    async fn all(&self) -> Result<Vec<Application>, Error> {
        Ok(lock(&self.applications).clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Application>, Error> {
        Ok(lock(&self.applications).iter().find(|a| a.id == id).cloned())
    }

    async fn replace(&self, application: &Application) -> Result<bool, Error> {
        let mut list = lock(&self.applications);
        let conflicts = application_conflicts(&list, application);
        if !conflicts.is_empty() {
            return Err(Error::Duplicate(conflicts));
        }
        match list.iter_mut().find(|a| a.id == application.id) {
            Some(slot) => {
                *slot = application.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_status(&self, id: &str, status: ApplicationStatus) -> Result<bool, Error> {
        Ok(lock(&self.applications).iter_mut().find(|a| a.id == id).map(|a| a.status = status).is_some())
    }

    async fn set_email_sent(&self, id: &str, sent: bool) -> Result<(), Error> {
        if let Some(a) = lock(&self.applications).iter_mut().find(|a| a.id == id) {
            a.is_email_send = sent;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, Error> {
        let mut list = lock(&self.applications);
        let before = list.len();
        list.retain(|a| a.id != id);
        Ok(list.len() != before)
    }
}

impl UserCommon for MemoryStore {
    async fn insert(&self, data: UserInsert) -> Result<User, Error> {
        let mut list = lock(&self.users);
        if list.iter().any(|u| eq_ci(&u.email, &data.email)) {
            return Err(Error::Duplicate(Error::field("email", "email already exists")));
        }
        let user = User {
            id: Uuid::new_v4().to_string(),
            full_name: data.full_name,
            email: data.email,
            phone: data.phone,
            student_index_id: data.student_index_id,
            password: data.password,
            salt: data.salt,
            role: data.role,
            status: data.status,
            faculty: data.faculty,
            year: data.year,
            profile_picture: data.profile_picture,
            linkedin: data.linkedin,
            created_at: data.created_at,
            last_login: None,
            last_login_ip: None,
            is_email_verified: data.is_email_verified,
        };
        list.push(user.clone());
        Ok(user)
    }

    async fn all(&self) -> Result<Vec<User>, Error> {
        Ok(lock(&self.users).clone())
    }

    async fn get(&self, id: &str) -> Result<Option<User>, Error> {
        Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        Ok(lock(&self.users).iter().find(|u| eq_ci(&u.email, email)).cloned())
    }

    async fn replace(&self, user: &User) -> Result<bool, Error> {
        let mut list = lock(&self.users);
        if list.iter().any(|u| u.id != user.id && eq_ci(&u.email, &user.email)) {
            return Err(Error::Duplicate(Error::field("email", "email already exists")));
        }
        match list.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn record_login(&self, id: &str, at: DateTime<Utc>, ip: Option<String>) -> Result<(), Error> {
        if let Some(u) = lock(&self.users).iter_mut().find(|u| u.id == id) {
            u.last_login = Some(at);
            u.last_login_ip = ip;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, Error> {
        let mut list = lock(&self.users);
        let before = list.len();
        list.retain(|u| u.id != id);
        Ok(list.len() != before)
    }
}

impl EventCommon for MemoryStore {
    async fn insert(&self, data: EventInsert) -> Result<Event, Error> {
        let event = Event {
            event_id: Uuid::new_v4().to_string(),
            event_name: data.event_name,
            event_type: data.event_type,
            organized_by: data.organized_by,
            event_date: data.event_date,
            start_time: data.start_time,
            end_time: data.end_time,
            venue: data.venue,
            description: data.description,
            image_url: data.image_url,
            registration_required: data.registration_required,
            registration_deadline: data.registration_deadline,
            max_participants: data.max_participants,
            contact_person: data.contact_person,
            status: data.status,
            is_active: data.is_active,
            created_at: data.created_at,
        };
        lock(&self.events).push(event.clone());
        Ok(event)
    }

    async fn all(&self) -> Result<Vec<Event>, Error> {
        Ok(lock(&self.events).clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, Error> {
        Ok(lock(&self.events).iter().find(|e| e.event_id == id).cloned())
    }

    async fn replace(&self, event: &Event) -> Result<bool, Error> {
        match lock(&self.events).iter_mut().find(|e| e.event_id == event.event_id) {
            Some(slot) => {
                *slot = event.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<bool, Error> {
        Ok(lock(&self.events).iter_mut().find(|e| e.event_id == id).map(|e| e.is_active = is_active).is_some())
    }

    async fn delete(&self, id: &str) -> Result<bool, Error> {
        let mut list = lock(&self.events);
        let before = list.len();
        list.retain(|e| e.event_id != id);
        Ok(list.len() != before)
    }
}

impl SettingCommon for MemoryStore {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(lock(&self.settings).get(key).cloned())
    }

    async fn put_setting(&self, key: &str, value: &str) -> Result<(), Error> {
        lock(&self.settings).insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Records every mail; `failing()` refuses all of them.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Mail>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Mail> {
        lock(&self.sent).clone()
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, mail: &Mail) -> Result<(), Error> {
        if self.fail {
            return Err(Error::Mail("relay unavailable".into()));
        }
        lock(&self.sent).push(mail.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeImageHost;

impl ImageHost for FakeImageHost {
    async fn upload(&self, file: UploadedFileCreate) -> Result<String, Error> {
        Ok(format!("https://images.test/{}", file.filename()))
    }
}

pub fn notify_config() -> NotifyConfig {
    NotifyConfig {
        club_name: "Robotics Club".into(),
        admin_email: "committee@club.test".into(),
        community_link: "https://chat.example.com/default".into(),
    }
}

pub fn application_form(email: &str, student_index_id: &str) -> ApplicationForm {
    ApplicationForm {
        name: "Test Applicant".into(),
        email: email.into(),
        student_index_id: student_index_id.into(),
        faculty: "Computing".into(),
        year: "1st Year".into(),
        interests: vec!["Web".into()],
        message: "Looking forward to it".into(),
    }
}

pub fn member_form(email: &str, password: &str, role: &str) -> UserForm {
    UserForm {
        full_name: format!("Member {}", email),
        email: email.into(),
        phone: "0771234567".into(),
        student_index_id: String::new(),
        password: Some(password.into()),
        role: role.into(),
        status: "active".into(),
        faculty: "Computing".into(),
        year: "2nd Year".into(),
        profile_picture: None,
        linkedin: None,
        is_email_verified: false,
    }
}

pub fn event_form(name: &str, date: NaiveDate) -> EventForm {
    EventForm {
        event_name: name.into(),
        event_type: "Workshop".into(),
        organized_by: "Committee".into(),
        event_date: Some(date),
        start_time: "10:00".into(),
        end_time: "12:00".into(),
        venue: "Lab 3".into(),
        description: "Hands-on session".into(),
        image_url: None,
        registration_required: false,
        registration_deadline: None,
        max_participants: None,
        contact_person: "Secretary".into(),
        status: "upcoming".into(),
        is_active: true,
    }
}
