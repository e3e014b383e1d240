//! Command-line interface

pub mod branches;
pub mod configure;
pub mod context;
pub mod history;
pub mod projects;
pub mod render;
pub mod status;
pub mod style;
