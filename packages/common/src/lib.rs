pub mod auth;
pub mod codec;
pub mod config;
pub mod editor;
pub mod model;
pub mod repository;
pub mod scoring;
pub mod slug;
pub mod storage;

pub use editor::{Edit, EditError, EditOutcome, Editor};
pub use model::{HackathonData, HackathonInfo, HackathonsList};
pub use repository::Repository;
