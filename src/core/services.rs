pub mod event;
pub mod intake;
pub mod member;
pub mod notification;
pub mod review;
pub mod stats;
