#[derive(Debug)]
pub struct UploadedFileCreate {
    pub name: String,
    pub extension: String,
    pub content: Vec<u8>,
}

impl UploadedFileCreate {
    /// Splits `photo.final.png` into name `photo.final` and extension `png`.
    pub fn from_filename(filename: &str, content: Vec<u8>) -> Self {
        let (name, extension) = match filename.rsplit_once('.') {
            Some((name, ext)) if !name.is_empty() => (name, ext),
            _ => (filename, ""),
        };
        Self {
            name: name.to_owned(),
            extension: extension.to_lowercase(),
            content,
        }
    }

    pub fn filename(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }
}
