#![forbid(unsafe_code)]

//! Host-page markup contract: `data-slide` role markers and class names.

/// Attribute carrying the role marker on every carousel element.
pub const ROLE_ATTRIBUTE: &str = "data-slide";

/// Attribute carrying a slide's ordinal (original index, or synthetic for clones).
pub const INDEX_ATTRIBUTE: &str = "data-index";

/// Class added to the four boundary clones.
pub const CLONE_CLASS: &str = "slide-cloned";

/// Class marking the active pagination control.
pub const ACTIVE_CLASS: &str = "active";

/// Classes added to every generated pagination control.
pub const CONTROL_BUTTON_CLASSES: [&str; 3] = ["slide-control-button", "fas", "fa-circle"];

/// Role marker values recognized on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideRole {
    Wrapper,
    List,
    Item,
    NavPreviousButton,
    NavNextButton,
    ControlsWrapper,
    ControlButton,
}

impl SlideRole {
    /// Elements the host page must provide exactly once.
    pub const REQUIRED: [Self; 5] = [
        Self::Wrapper,
        Self::List,
        Self::NavPreviousButton,
        Self::NavNextButton,
        Self::ControlsWrapper,
    ];

    /// Value of the `data-slide` attribute.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Wrapper => "wrapper",
            Self::List => "list",
            Self::Item => "item",
            Self::NavPreviousButton => "nav-previous-button",
            Self::NavNextButton => "nav-next-button",
            Self::ControlsWrapper => "controls-wrapper",
            Self::ControlButton => "control-button",
        }
    }

    /// CSS attribute selector matching elements with this role.
    #[must_use]
    pub fn selector(self) -> String {
        format!("[{ROLE_ATTRIBUTE}=\"{}\"]", self.marker())
    }
}
