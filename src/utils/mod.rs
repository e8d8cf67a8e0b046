pub mod cgpa;
pub mod commands;
pub mod form;
pub mod render;
pub mod session;
