//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::grid::{PageRequest, SentinelTarget};

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the grid
    Redraw,
    /// Fetch a page in the background
    /// Sends Msg::Data(PageLoaded) when done
    FetchPage(PageRequest),
    /// Re-register the scroll sentinel on a new last row (disconnect first),
    /// or just disconnect when `None`
    WatchSentinel(Option<SentinelTarget>),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Combine two optional commands into one
    pub fn merge(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
        match (a, b) {
            (None, None) => None,
            (Some(cmd), None) | (None, Some(cmd)) => Some(cmd),
            (Some(a), Some(b)) => Some(Cmd::Batch(vec![a, b])),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::FetchPage(_) => true,
            Cmd::WatchSentinel(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            Cmd::None => Vec::new(),
            cmd => vec![cmd],
        }
    }

    /// All page fetches contained in this command
    pub fn fetches(&self) -> Vec<&PageRequest> {
        match self {
            Cmd::FetchPage(request) => vec![request],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.fetches()).collect(),
            _ => Vec::new(),
        }
    }

    /// The last sentinel registration in this command, if any
    pub fn sentinel(&self) -> Option<Option<SentinelTarget>> {
        match self {
            Cmd::WatchSentinel(target) => Some(*target),
            Cmd::Batch(cmds) => cmds.iter().rev().find_map(|c| c.sentinel()),
            _ => None,
        }
    }
}
