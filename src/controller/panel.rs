//! Popup panel visibility

/// Visibility of the popup panel
///
/// Hiding never destroys the panel, so selection and slider values survive
/// any number of toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    /// Not on screen (initial state)
    #[default]
    Hidden,
    /// On screen, next to the tray
    Visible,
}

/// What the GUI has to do after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTransition {
    /// Position the panel near the tray, show it and give it focus
    Show,
    /// Hide the panel, keeping its state
    Hide,
}

impl PanelVisibility {
    /// Flip visibility and return the action to perform
    pub fn toggle(&mut self) -> PanelTransition {
        match self {
            Self::Hidden => {
                *self = Self::Visible;
                PanelTransition::Show
            }
            Self::Visible => {
                *self = Self::Hidden;
                PanelTransition::Hide
            }
        }
    }

    /// Force the hidden state (exit, window closed)
    ///
    /// Returns `Some(PanelTransition::Hide)` when the panel was visible.
    pub fn hide(&mut self) -> Option<PanelTransition> {
        match self {
            Self::Visible => {
                *self = Self::Hidden;
                Some(PanelTransition::Hide)
            }
            Self::Hidden => None,
        }
    }

    /// Whether the panel is on screen
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}
