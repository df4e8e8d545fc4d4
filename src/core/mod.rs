//! # Core Application Logic
//!
//! This module contains the business logic of Hacker Stories.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. No terminal.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │ Search API │
//!           │  Adapter   │              │  (reqwest) │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`stories`]: The stories reducer
//! - [`persist`]: Persisted search term
//! - [`fetch`]: Turns fetch effects into actions
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod fetch;
pub mod persist;
pub mod state;
pub mod stories;
