use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{query, query_as, PgPool};
use uuid::Uuid;

use crate::core::models::{
    application::{Application, ApplicationInsert, ApplicationStatus},
    event::{Event, EventInsert},
    user::{User, UserInsert},
};
use crate::core::ports::repository::{ApplicationCommon, EventCommon, SettingCommon, UserCommon};
use crate::database::models::application::ApplicationRow;
use crate::error::{Error, FieldErrors};

static UNIQUE_VIOLATION: &str = "23505";

/// Unique index name, offending field, message.
type UniqueIndex = (&'static str, &'static str, &'static str);

static APPLICATION_INDEXES: &[UniqueIndex] = &[
    ("applications_email_idx", "email", "An application with this email already exists"),
    ("applications_student_index_id_idx", "studentIndexId", "An application with this student index ID already exists"),
];

static USER_INDEXES: &[UniqueIndex] = &[("users_email_idx", "email", "A member with this email already exists")];

/// Maps a unique-violation message to the offending fields by the index name it mentions.
fn duplicate_fields(message: &str, indexes: &[UniqueIndex]) -> FieldErrors {
    let mut fields: FieldErrors = indexes
        .iter()
        .filter(|(index, _, _)| message.contains(&format!("\"{}\"", index)))
        .map(|(_, field, text)| (field.to_string(), text.to_string()))
        .collect();
    if fields.is_empty() {
        fields.insert("record".into(), "record already exists".into());
    }
    fields
}

fn map_unique(err: sqlx::Error, indexes: &[UniqueIndex]) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return Error::Duplicate(duplicate_fields(db.message(), indexes));
        }
    }
    Error::Database(err)
}

/// Record collections backed by Postgres tables.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new().max_connections(max_connections).connect(url).await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), Error> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }
}

impl ApplicationCommon for PgStore {
    async fn insert(&self, data: ApplicationInsert) -> Result<Application, Error> {
        let row: ApplicationRow = query_as(
            "INSERT INTO applications (id, name, email, student_index_id, faculty, year, interests, message, submitted_at, status, is_email_send)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(data.name)
        .bind(data.email)
        .bind(data.student_index_id)
        .bind(data.faculty)
        .bind(data.year)
        .bind(data.interests)
        .bind(data.message)
        .bind(data.timestamp)
        .bind(data.status.as_str())
        .bind(data.is_email_send)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, APPLICATION_INDEXES))?;
        row.try_into()
    }

    async fn all(&self) -> Result<Vec<Application>, Error> {
        let rows: Vec<ApplicationRow> = query_as("SELECT * FROM applications ORDER BY submitted_at DESC").fetch_all(&self.pool).await?;
        rows.into_iter().map(Application::try_from).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Application>, Error> {
        let row: Option<ApplicationRow> = query_as("SELECT * FROM applications WHERE id = $1").bind(id).fetch_optional(&self.pool).await?;
        row.map(Application::try_from).transpose()
    }

    async fn replace(&self, application: &Application) -> Result<bool, Error> {
        let res = query(
            "UPDATE applications
            SET name = $2, email = $3, student_index_id = $4, faculty = $5, year = $6, interests = $7,
                message = $8, submitted_at = $9, status = $10, is_email_send = $11
            WHERE id = $1",
        )
        .bind(&application.id)
        .bind(&application.name)
        .bind(&application.email)
        .bind(&application.student_index_id)
        .bind(&application.faculty)
        .bind(&application.year)
        .bind(&application.interests)
        .bind(&application.message)
        .bind(application.timestamp)
        .bind(application.status.as_str())
        .bind(application.is_email_send)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, APPLICATION_INDEXES))?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_status(&self, id: &str, status: ApplicationStatus) -> Result<bool, Error> {
        let res = query("UPDATE applications SET status = $1 WHERE id = $2").bind(status.as_str()).bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_email_sent(&self, id: &str, sent: bool) -> Result<(), Error> {
        query("UPDATE applications SET is_email_send = $1 WHERE id = $2").bind(sent).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, Error> {
        let res = query("DELETE FROM applications WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected() > 0)
    }
}

impl UserCommon for PgStore {
    async fn insert(&self, data: UserInsert) -> Result<User, Error> {
        let user = query_as(
            "INSERT INTO users (id, full_name, email, phone, student_index_id, password, salt, role, status, faculty, year, profile_picture, linkedin, created_at, is_email_verified)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(data.full_name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.student_index_id)
        .bind(data.password)
        .bind(data.salt)
        .bind(data.role)
        .bind(data.status)
        .bind(data.faculty)
        .bind(data.year)
        .bind(data.profile_picture)
        .bind(data.linkedin)
        .bind(data.created_at)
        .bind(data.is_email_verified)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, USER_INDEXES))?;
        Ok(user)
    }

    async fn all(&self) -> Result<Vec<User>, Error> {
        let users = query_as("SELECT * FROM users ORDER BY created_at DESC").fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn get(&self, id: &str) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE id = $1").bind(id).fetch_optional(&self.pool).await?;
        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE lower(email) = lower($1)").bind(email).fetch_optional(&self.pool).await?;
        Ok(user)
    }

    async fn replace(&self, user: &User) -> Result<bool, Error> {
        let res = query(
            "UPDATE users
            SET full_name = $2, email = $3, phone = $4, student_index_id = $5, password = $6, salt = $7, role = $8,
                status = $9, faculty = $10, year = $11, profile_picture = $12, linkedin = $13, created_at = $14,
                last_login = $15, last_login_ip = $16, is_email_verified = $17
            WHERE id = $1",
        )
        .bind(&user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.student_index_id)
        .bind(&user.password)
        .bind(&user.salt)
        .bind(&user.role)
        .bind(&user.status)
        .bind(&user.faculty)
        .bind(&user.year)
        .bind(&user.profile_picture)
        .bind(&user.linkedin)
        .bind(user.created_at)
        .bind(user.last_login)
        .bind(&user.last_login_ip)
        .bind(user.is_email_verified)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, USER_INDEXES))?;
        Ok(res.rows_affected() > 0)
    }

    async fn record_login(&self, id: &str, at: DateTime<Utc>, ip: Option<String>) -> Result<(), Error> {
        query("UPDATE users SET last_login = $1, last_login_ip = $2 WHERE id = $3").bind(at).bind(ip).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, Error> {
        let res = query("DELETE FROM users WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected() > 0)
    }
}

impl EventCommon for PgStore {
    async fn insert(&self, data: EventInsert) -> Result<Event, Error> {
        let event = query_as(
            "INSERT INTO events (event_id, event_name, event_type, organized_by, event_date, start_time, end_time, venue, description,
                image_url, registration_required, registration_deadline, max_participants, contact_person, status, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(data.event_name)
        .bind(data.event_type)
        .bind(data.organized_by)
        .bind(data.event_date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.venue)
        .bind(data.description)
        .bind(data.image_url)
        .bind(data.registration_required)
        .bind(data.registration_deadline)
        .bind(data.max_participants)
        .bind(data.contact_person)
        .bind(data.status)
        .bind(data.is_active)
        .bind(data.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    async fn all(&self) -> Result<Vec<Event>, Error> {
        let events = query_as("SELECT * FROM events ORDER BY event_date").fetch_all(&self.pool).await?;
        Ok(events)
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, Error> {
        let event = query_as("SELECT * FROM events WHERE event_id = $1").bind(id).fetch_optional(&self.pool).await?;
        Ok(event)
    }

    async fn replace(&self, event: &Event) -> Result<bool, Error> {
        let res = query(
            "UPDATE events
            SET event_name = $2, event_type = $3, organized_by = $4, event_date = $5, start_time = $6, end_time = $7,
                venue = $8, description = $9, image_url = $10, registration_required = $11, registration_deadline = $12,
                max_participants = $13, contact_person = $14, status = $15, is_active = $16, created_at = $17
            WHERE event_id = $1",
        )
        .bind(&event.event_id)
        .bind(&event.event_name)
        .bind(&event.event_type)
        .bind(&event.organized_by)
        .bind(event.event_date)
        .bind(&event.start_time)
        .bind(&event.end_time)
        .bind(&event.venue)
        .bind(&event.description)
        .bind(&event.image_url)
        .bind(event.registration_required)
        .bind(event.registration_deadline)
        .bind(event.max_participants)
        .bind(&event.contact_person)
        .bind(&event.status)
        .bind(event.is_active)
        .bind(event.created_at)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<bool, Error> {
        let res = query("UPDATE events SET is_active = $1 WHERE event_id = $2").bind(is_active).bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, Error> {
        let res = query("DELETE FROM events WHERE event_id = $1").bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected() > 0)
    }
}

impl SettingCommon for PgStore {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, Error> {
        let value = sqlx::query_scalar("SELECT value FROM settings WHERE key = $1").bind(key).fetch_optional(&self.pool).await?;
        Ok(value)
    }

    async fn put_setting(&self, key: &str, value: &str) -> Result<(), Error> {
        query("INSERT INTO settings (key, value) VALUES ($1, $2) ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
