pub mod repo;

pub use repo::{CommitRecord, GitRepo};
