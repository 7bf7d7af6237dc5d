use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct List<T> {
    list: Vec<T>,
    total: i64,
}

impl<T> List<T> {
    pub fn new(list: Vec<T>, total: i64) -> Self {
        List { list, total }
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(list: Vec<T>) -> Self {
        let total = list.len() as i64;
        List { list, total }
    }
}

/// `{success, message}` body returned by the notification endpoints.
#[derive(Debug, Serialize)]
pub struct Message {
    pub success: bool,
    pub message: String,
}

impl Message {
    pub fn ok(message: &str) -> Self {
        Self { success: true, message: message.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
