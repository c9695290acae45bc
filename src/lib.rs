//! Duobot is a terminal chat client for a dual QA bot backend: a business
//! assistant and a healthcare assistant behind one HTTP endpoint.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the reply formatter (the structured parse of the
//!   backend's markdown-like reply dialect), per-bot conversation
//!   histories, bot profiles, and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`api`] defines wire payloads and the HTTP calls to the backend.
//! - [`utils`] holds transcript logging and URL plumbing.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`) and
//! dispatches into [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod core;
pub mod ui;
pub mod utils;
