//! Color constants for the studio chrome.
//!
//! Card colors live with the renderer; these style the window around it and
//! mirror the custom properties in `GLOBAL_STYLES`.

/// Page background (`--paper`)
pub const PAPER: &str = "#fff8f9";

/// Body text (`--ink`)
pub const INK: &str = "#2b1b22";
