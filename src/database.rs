pub mod models;
pub mod postgres;
