pub mod credential;
pub mod event;

pub use credential::PostgresCredentialRepository;
pub use event::PostgresEventRepository;
