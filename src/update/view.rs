//! View-state message handlers (sort, search, pinning)

use crate::commands::Cmd;
use crate::messages::ViewMsg;
use crate::model::GridModel;

/// Handle view-state messages
pub fn update_view(model: &mut GridModel, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::ActivateHeader(field) => {
            if model.column(&field).is_none() {
                tracing::warn!("Header activated for unknown column {:?}", field);
                return None;
            }
            model.sort = model.sort.cycle(&field);
            tracing::debug!(
                "Sort is now {:?} {:?}",
                model.sort.key(),
                model.sort.direction()
            );
            Some(Cmd::Redraw)
        }

        ViewMsg::SetSearch(term) => {
            if term == model.search.term() {
                return None;
            }
            model.search.set(term);
            Some(Cmd::Redraw)
        }

        ViewMsg::ClearSearch => {
            if !model.search.is_active() {
                return None;
            }
            model.search.clear();
            Some(Cmd::Redraw)
        }

        ViewMsg::TogglePin(field) => {
            if model.column(&field).is_none() {
                tracing::warn!("Pin toggled for unknown column {:?}", field);
                return None;
            }
            let pinned = model.pinned.toggle(&field);
            tracing::debug!("Column {:?} pinned: {}", field, pinned);
            Some(Cmd::Redraw)
        }
    }
}
