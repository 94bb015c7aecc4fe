//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. After every
//! message the derived view is refreshed, so the returned command already
//! contains any sentinel re-registration.

mod data;
mod ui;
mod view;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::GridModel;
use crate::tracing::LoadSnapshot;

use tracing::{debug, span, Level};

pub use data::update_data;
pub use ui::update_ui;
pub use view::update_view;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut GridModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let before = LoadSnapshot::from_model(model);

    let result = match msg {
        Msg::Data(m) => data::update_data(model, m),
        Msg::View(m) => view::update_view(model, m),
        Msg::Ui(m) => ui::update_ui(model, m),
    };
    let effects = model.refresh_derived();

    let after = LoadSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }

    Cmd::merge(result, effects)
}

/// Get a display name for a message type
///
/// Page payloads are summarized rather than dumped.
/// Example outputs:
/// - `View::ActivateHeader("email")`
/// - `Data::PageLoaded(gen=0 seq=3 rows=100)`
pub fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::DataMsg;

    match msg {
        Msg::Data(DataMsg::PageLoaded(response)) => match &response.result {
            Ok(rows) => format!(
                "Data::PageLoaded(gen={} seq={} rows={})",
                response.generation,
                response.seq,
                rows.len()
            ),
            Err(e) => format!(
                "Data::PageLoaded(gen={} seq={} error={})",
                response.generation, response.seq, e
            ),
        },
        Msg::Data(m) => format!("Data::{:?}", m),
        Msg::View(m) => format!("View::{:?}", m),
        Msg::Ui(m) => format!("Ui::{:?}", m),
    }
}
