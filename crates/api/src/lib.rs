//! Financial Agent HTTP API.
//!
//! Endpoints:
//! - GET  /, /health
//! - CRUD /api/assets, /api/liabilities, /api/expenses, /api/goals
//! - POST /fi/calculate-status

pub mod middleware;
pub mod routes;
pub mod state;
