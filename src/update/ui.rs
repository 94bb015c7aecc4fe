//! UI message handlers (theme)

use crate::commands::Cmd;
use crate::messages::UiMsg;
use crate::model::GridModel;
use crate::theme::{Theme, ThemeMode};

/// Handle UI messages
pub fn update_ui(model: &mut GridModel, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::ToggleTheme => {
            let mode = model.theme.mode.toggled();
            set_theme(model, mode)
        }
        UiMsg::SetTheme(mode) => {
            if model.theme.mode == mode {
                return None;
            }
            set_theme(model, mode)
        }
    }
}

fn set_theme(model: &mut GridModel, mode: ThemeMode) -> Option<Cmd> {
    model.theme = Theme::load(mode);
    tracing::info!("Switched to theme: {}", model.theme.name);
    Some(Cmd::Redraw)
}
