use std::fmt::Display;
use std::str::FromStr;

use log::info;

use crate::core::services::member::AdminRoles;
use crate::core::services::notification::NotifyConfig;
use crate::error::Error;

pub static DATABASE_URL: &str = "DATABASE_URL";

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub relay_url: String,
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
}

#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    pub upload_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_address: String,
    pub port: u16,
    pub mail: MailConfig,
    pub image_host: ImageHostConfig,
    pub notify: NotifyConfig,
    pub admin_roles: AdminRoles,
    pub static_dir: Option<String>,
}

impl Config {
    /// Reads the process environment; call `dotenv::dotenv()` first so `.env` is merged in.
    pub fn load() -> Result<Self, Error> {
        let sender_email = required("MAIL_SENDER_EMAIL")?;
        Ok(Self {
            database_url: required(DATABASE_URL)?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            bind_address: or_default("BIND_ADDRESS", "0.0.0.0"),
            port: parse_or("PORT", 8000)?,
            mail: MailConfig {
                relay_url: or_default("MAIL_RELAY_URL", "https://api.brevo.com/v3/smtp/email"),
                api_key: required("MAIL_API_KEY")?,
                sender_name: or_default("MAIL_SENDER_NAME", "Club Membership Team"),
                sender_email: sender_email.clone(),
            },
            image_host: ImageHostConfig {
                upload_url: or_default("IMAGE_HOST_URL", "https://api.imgbb.com/1/upload"),
                api_key: or_default("IMAGE_HOST_API_KEY", ""),
            },
            notify: NotifyConfig {
                club_name: or_default("CLUB_NAME", "Our Club"),
                admin_email: dotenv::var("ADMIN_NOTIFY_EMAIL").unwrap_or(sender_email),
                community_link: or_default("COMMUNITY_LINK", ""),
            },
            admin_roles: AdminRoles::parse(&or_default("ADMIN_ROLES", "admin,president,secretary")),
            static_dir: dotenv::var("STATIC_DIR").ok().filter(|dir| !dir.trim().is_empty()),
        })
    }
}

fn required(key: &str) -> Result<String, Error> {
    dotenv::var(key).map_err(|_| Error::Config(format!("environment variable {} not been set", key)))
}

fn or_default(key: &str, default: &str) -> String {
    dotenv::var(key).unwrap_or_else(|_| {
        info!("{} not set, using default: {}", key, default);
        default.to_owned()
    })
}

fn parse_or<T>(key: &str, default: T) -> Result<T, Error>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match dotenv::var(key) {
        Ok(v) => v.trim().parse().map_err(|e| Error::Config(format!("invalid {} value: {}", key, e))),
        Err(_) => {
            info!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}
