pub mod auth;
pub mod data;
pub mod export;
pub mod hackathon;
