//! # Core Application Logic
//!
//! This module contains Nyaya's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (session data) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • perform() (effects)  │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐               ┌──────────────┐
//!          │    TUI     │               │   services   │
//!          │  Adapter   │               │ (HTTP APIs)  │
//!          │ (ratatui)  │               │              │
//!          └────────────┘               └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum, `Effect` enum and the `update()` reducer
//! - [`effects`]: Runs request effects against the remote collaborators
//! - [`transcript`]: Messages and the ordered transcript
//! - [`config`]: Layered configuration
//! - [`lawyers`]: Lawyer directory contract and fixture
//! - [`resources`]: Static forms and livestream links

pub mod action;
pub mod config;
pub mod effects;
pub mod lawyers;
pub mod resources;
pub mod state;
pub mod transcript;
