//! Styles for the terminal renderer.
//!
//! All colors are `AdaptiveColor`s so the table reads well on light and dark
//! terminals alike.

use lipgloss_extras::prelude::*;

/// Arrow shown in the navigation column when columns are hidden on the left.
pub const ARROW_LEFT: &str = "◂";

/// Arrow shown in the navigation column when columns are hidden on the right.
pub const ARROW_RIGHT: &str = "▸";

/// Marks text cut short to fit its column.
pub const ELLIPSIS: &str = "…";

/// Styles for every element the terminal renderer draws.
#[derive(Debug, Clone)]
pub struct TableStyles {
    /// Column labels.
    pub header: Style,
    /// `<type>` line under each label.
    pub header_type: Style,
    /// Regular body cells. Its horizontal padding is what calibration
    /// reports as cell padding, so keep it non-zero.
    pub cell: Style,
    /// Missing-value cells.
    pub missing_cell: Style,
    /// Column navigation arrows.
    pub nav_arrow: Style,
    /// Page links other than the current one.
    pub page_link: Style,
    /// The current page link.
    pub page_link_current: Style,
    /// Enabled Previous/Next controls.
    pub nav_enabled: Style,
    /// Disabled Previous/Next controls.
    pub nav_disabled: Style,
    /// Footer summary label.
    pub info: Style,
    /// Message shown for an empty table.
    pub empty: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let accent = AdaptiveColor {
            Light: "#04B575",
            Dark: "#ECFD65",
        };

        Self {
            header: Style::new().bold(true).padding(0, 1, 0, 1),
            header_type: Style::new()
                .foreground(subdued.clone())
                .padding(0, 1, 0, 1),
            cell: Style::new().padding(0, 1, 0, 1),
            missing_cell: Style::new()
                .foreground(subdued.clone())
                .italic(true)
                .padding(0, 1, 0, 1),
            nav_arrow: Style::new().foreground(accent.clone()).padding(0, 1, 0, 1),
            page_link: Style::new().foreground(subdued.clone()),
            page_link_current: Style::new().foreground(accent.clone()).bold(true),
            nav_enabled: Style::new().foreground(accent),
            nav_disabled: Style::new().foreground(subdued.clone()).faint(true),
            info: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            empty: Style::new().foreground(subdued).italic(true),
        }
    }
}
