//! Shiftwatch server
//!
//! Serves the clock-in workflow, the worker history and the manager
//! dashboard as JSON over HTTP. All geofence and attendance logic lives in
//! `shiftwatch-core`; this crate adds configuration, shared state, request
//! parsing and error mapping.
//!
//! # Endpoints
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET | `/api/workplace` | Active workplace settings |
//! | PUT | `/api/workplace` | Replace the workplace settings |
//! | POST | `/api/workplace/distance` | Distance of a position from the workplace |
//! | POST | `/api/workers/{worker}/status` | Location and shift status for a worker |
//! | POST | `/api/workers/{worker}/clock-in` | Clock in |
//! | POST | `/api/workers/{worker}/clock-out` | Clock out |
//! | GET | `/api/workers/{worker}/records` | Worker history |
//! | GET | `/api/workers/{worker}/stats` | Worker totals |
//! | GET | `/api/records` | All records |
//! | GET | `/api/records/active` | Open shifts |
//! | GET | `/api/stats` | Totals over all records |
//! | GET | `/api/dashboard` | Manager overview |
//!
//! The record and stats endpoints accept optional `start` and `end` query
//! parameters (RFC 3339) that filter on clock-in time.

pub mod config;
pub mod error;
pub mod state;
pub mod web;

pub use config::Cli;
pub use error::AppError;
pub use state::{AppState, SharedState};
pub use web::build_router;
