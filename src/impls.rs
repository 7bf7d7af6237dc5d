pub mod mailers;
pub mod uploaders;
