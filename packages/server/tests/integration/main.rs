
mod auth;
mod data;
mod docs;
mod edits;
mod hackathons;
