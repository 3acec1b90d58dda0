//! Overlay widgets: menu bar, export and opacity panels, dialogs and tooltips.
//!
//! Geometry and hit-testing live in [`layout`], menu structure in [`menu`],
//! dialog state in [`modal`], generated text in [`help`] and Cairo drawing in
//! [`render`].

pub mod help;
pub mod layout;
pub mod menu;
pub mod modal;
pub mod render;

pub use layout::{Layout, MENU_BAR_HEIGHT, PanelButton, TooltipZone, UiTarget};
pub use menu::MenuId;
pub use modal::{Message, MessageKind, Modal};
pub use render::{UiTheme, render_popups, render_restore_tab, render_window};
