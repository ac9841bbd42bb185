pub mod credential;
pub mod event;
