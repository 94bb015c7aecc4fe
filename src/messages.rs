//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::grid::PageResponse;
use crate::theme::ThemeMode;

/// Paging messages
#[derive(Debug, Clone)]
pub enum DataMsg {
    /// Ask for the next page (dropped while one is in flight)
    RequestNextPage,
    /// The watched last row became visible
    SentinelVisible,
    /// A fetch finished, successfully or not
    PageLoaded(PageResponse),
    /// Drop all rows and start loading from scratch
    Reset,
}

/// View-state messages
#[derive(Debug, Clone)]
pub enum ViewMsg {
    /// Header click: cycle the sort for this column
    ActivateHeader(String),
    /// Search input changed
    SetSearch(String),
    ClearSearch,
    /// Pin or unpin a column
    TogglePin(String),
}

/// UI chrome messages
#[derive(Debug, Clone)]
pub enum UiMsg {
    ToggleTheme,
    SetTheme(ThemeMode),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Data(DataMsg),
    View(ViewMsg),
    Ui(UiMsg),
}

impl From<DataMsg> for Msg {
    fn from(msg: DataMsg) -> Self {
        Msg::Data(msg)
    }
}

impl From<ViewMsg> for Msg {
    fn from(msg: ViewMsg) -> Self {
        Msg::View(msg)
    }
}

impl From<UiMsg> for Msg {
    fn from(msg: UiMsg) -> Self {
        Msg::Ui(msg)
    }
}
