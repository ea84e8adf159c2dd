//! HTTP request handlers

pub mod catalog;
pub mod forecast;
pub mod health;
