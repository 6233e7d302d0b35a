//! Shared component rendering context
//!
//! `ComponentContext` carries what components may need during rendering,
//! resizing, and event handling: focus state and the window registry. Hosts
//! build one per frame and pass it down explicitly.

use crate::window::WindowRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("window registry is not available in this component context")]
    RegistryUnavailable,
}

/// Context passed to `Component` trait methods.
///
/// - `focused`: whether the component is currently focused.
/// - `windows`: the window registry, when the host has one.
#[derive(Debug, Clone, Default)]
pub struct ComponentContext {
    focused: bool,
    windows: Option<WindowRegistry>,
}

impl ComponentContext {
    pub fn new(focused: bool) -> Self {
        Self {
            focused,
            windows: None,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn with_windows(mut self, windows: WindowRegistry) -> Self {
        self.windows = Some(windows);
        self
    }

    /// The window registry.
    ///
    /// # Panics
    ///
    /// Panics when the context was built without a registry. Window-opening
    /// components only make sense under a host that provides one.
    pub fn windows(&self) -> &WindowRegistry {
        match self.windows.as_ref() {
            Some(windows) => windows,
            None => panic!("{}", ContextError::RegistryUnavailable),
        }
    }

    pub fn try_windows(&self) -> Result<&WindowRegistry, ContextError> {
        self.windows.as_ref().ok_or(ContextError::RegistryUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_shared_through_context() {
        let registry = WindowRegistry::new();
        let ctx = ComponentContext::new(true).with_windows(registry.clone());
        assert!(ctx.focused());
        assert!(ctx.try_windows().is_ok());
        assert!(ctx.windows().is_empty());
        let unfocused = ctx.clone().with_focus(false);
        assert!(!unfocused.focused());
        assert!(unfocused.try_windows().is_ok());
    }

    #[test]
    fn try_windows_reports_missing_registry() {
        let ctx = ComponentContext::default();
        assert_eq!(
            ctx.try_windows().err(),
            Some(ContextError::RegistryUnavailable)
        );
    }

    #[test]
    #[should_panic(expected = "window registry is not available")]
    fn windows_panics_without_registry() {
        let ctx = ComponentContext::new(false);
        let _ = ctx.windows();
    }
}
