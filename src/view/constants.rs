//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the search box in lines (border + content).
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of a slot bar (filter or bulk actions) in lines.
pub const SLOT_BAR_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Selection summary, page size, page position and the last status message.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the checkbox column, e.g. `[x]`.
pub const CHECKBOX_WIDTH: u16 = 3;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
