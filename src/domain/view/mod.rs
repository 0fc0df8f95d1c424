//! View domain module

mod state;
mod visibility;

pub use state::{ErrorToast, ResultsView, ViewError, ViewSection, ViewState, TOAST_TIMEOUT};
pub use visibility::{final_banner, visible_rows, FinalBanner, ModalityRow, FINAL_ROW_LABEL};
