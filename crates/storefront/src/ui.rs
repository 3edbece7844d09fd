//! UI visibility flags.

/// Two independent visibility flags. Neither is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    wishlist_drawer_open: bool,
    mobile_menu_open: bool,
}

impl UiState {
    /// Both flags closed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wishlist_drawer_open: false,
            mobile_menu_open: false,
        }
    }

    pub const fn toggle_wishlist_drawer(&mut self) {
        self.wishlist_drawer_open = !self.wishlist_drawer_open;
    }

    pub const fn open_wishlist_drawer(&mut self) {
        self.wishlist_drawer_open = true;
    }

    pub const fn close_wishlist_drawer(&mut self) {
        self.wishlist_drawer_open = false;
    }

    pub const fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub const fn close_mobile_menu(&mut self) {
        self.mobile_menu_open = false;
    }

    #[must_use]
    pub const fn is_wishlist_drawer_open(&self) -> bool {
        self.wishlist_drawer_open
    }

    #[must_use]
    pub const fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let ui = UiState::new();
        assert!(!ui.is_wishlist_drawer_open());
        assert!(!ui.is_mobile_menu_open());
        assert_eq!(ui, UiState::default());
    }

    #[test]
    fn test_drawer_ops_leave_menu_alone() {
        let mut ui = UiState::new();
        ui.toggle_wishlist_drawer();
        assert!(ui.is_wishlist_drawer_open());
        ui.toggle_wishlist_drawer();
        assert!(!ui.is_wishlist_drawer_open());

        ui.open_wishlist_drawer();
        ui.open_wishlist_drawer();
        assert!(ui.is_wishlist_drawer_open());
        assert!(!ui.is_mobile_menu_open());

        ui.close_wishlist_drawer();
        assert!(!ui.is_wishlist_drawer_open());
    }

    #[test]
    fn test_menu_ops_leave_drawer_alone() {
        let mut ui = UiState::new();
        ui.open_wishlist_drawer();

        ui.toggle_mobile_menu();
        assert!(ui.is_mobile_menu_open());
        assert!(ui.is_wishlist_drawer_open());

        ui.close_mobile_menu();
        ui.close_mobile_menu();
        assert!(!ui.is_mobile_menu_open());
        assert!(ui.is_wishlist_drawer_open());
    }
}
