//! CLI command implementations.

pub mod clear;
pub mod login;
pub mod logout;
pub mod send;
pub mod show;
pub mod status;
pub mod typing;
