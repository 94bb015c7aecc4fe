//! Grid pipeline
//!
//! The pieces the controller (`GridModel` + `update`) wires together:
//!
//! ```text
//! PageLoader ──rows──▶ LoadedRows ──▶ compute_widths ─┐
//!     ▲                     │                          ├──▶ RenderModel
//!     │                     └──────▶ derive_view ──────┘        │
//!     └──────── SentinelVisible ◀── VisibilityObserver ◀─ last row
//! ```
//!
//! `width` and `derive` are pure functions over borrowed snapshots; `loader`
//! is the only stateful piece.

pub mod derive;
pub mod loader;
pub mod render_model;
pub mod sentinel;
pub mod width;

pub use derive::{derive_view, DerivedView, SortKey};
pub use loader::{Completion, LoadState, PageLoader, PageRequest, PageResponse};
pub use render_model::{RenderColumn, RenderModel};
pub use sentinel::{SentinelTarget, ViewportObserver, VisibilityObserver};
pub use width::{
    compute_width, compute_widths, measurer_for, ColumnWidths, FontMeasurer, MeasureError,
    MonospaceMeasurer, TextMeasurer, WidthSettings,
};
