//! Collaboration graph, C/P indices and activity tables for a landscape of
//! git repositories.

pub mod cli;
pub mod config;
pub mod contributors;
pub mod error;
pub mod extensions;
pub mod git;
pub mod identity;
pub mod model;
pub mod people;
pub mod projects;
pub mod report;
pub mod scan;
pub mod session;
pub mod util;
pub mod window;

pub use error::{LandscapeError, Result};
pub use report::LandscapeReport;
