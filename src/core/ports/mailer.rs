use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Mail {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub html: String,
}

pub trait Mailer {
    async fn send(&self, mail: &Mail) -> Result<(), Error>;
}
