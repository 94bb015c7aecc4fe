//! Runtime module - headless host for the grid
//!
//! `app` executes the commands returned by `update`: page fetches run on
//! worker threads and report back over a channel, sentinel registrations go
//! to a simulated viewport.

pub mod app;

pub use app::App;
