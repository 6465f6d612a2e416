//! Output rendering module

pub mod formatter;
