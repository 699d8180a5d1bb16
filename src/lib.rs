//! # Mindful Journal
//!
//! Terminal client for a journaling server: login and registration forms, a
//! dashboard of diary entries with an editor, and a sentiment analysis panel.
//! All data lives on the server and is reached over its HTTP/JSON API.

pub mod analysis;
pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod diary_entry;
pub mod diary_state;
pub mod editor;
pub mod error;
pub mod input;
pub mod logging;
pub mod tui;
pub mod ui;
