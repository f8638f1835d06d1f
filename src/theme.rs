#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☀️",
            Self::Dark => "🌙",
        }
    }

    /// Stored preference wins; otherwise the system color scheme decides.
    pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        stored.and_then(Self::parse).unwrap_or(if system_prefers_dark {
            Self::Dark
        } else {
            Self::Light
        })
    }
}

/// Where the chosen theme is remembered between visits.
pub trait ThemeStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, theme: Theme);
}

/// Owns the current theme and persists every change.
pub struct ThemeController<S> {
    current: Theme,
    store: S,
}

impl<S: ThemeStore> ThemeController<S> {
    pub fn init(store: S, system_prefers_dark: bool) -> Self {
        let stored = store.load();
        let mut controller = Self {
            current: Theme::resolve(stored.as_deref(), system_prefers_dark),
            store,
        };
        controller.store.save(controller.current);
        controller
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.store.save(self.current);
        self.current
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        value: Option<String>,
        writes: Vec<String>,
    }

    impl ThemeStore for MemoryStore {
        fn load(&self) -> Option<String> {
            self.value.clone()
        }

        fn save(&mut self, theme: Theme) {
            self.value = Some(theme.as_str().to_string());
            self.writes.push(theme.as_str().to_string());
        }
    }

    #[test]
    fn stored_preference_beats_system() {
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
    }

    #[test]
    fn unknown_stored_value_falls_back_to_system() {
        assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn system_dark_applies_when_nothing_stored() {
        let controller = ThemeController::init(MemoryStore::default(), true);

        assert_eq!(controller.current(), Theme::Dark);
        assert_eq!(controller.store().writes, vec!["dark"]);
    }

    #[test]
    fn toggling_twice_returns_and_persists_each_step() {
        let mut controller = ThemeController::init(MemoryStore::default(), false);

        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(controller.toggle(), Theme::Light);
        assert_eq!(controller.store().writes, vec!["light", "dark", "light"]);
        assert_eq!(controller.store().value.as_deref(), Some("light"));
    }

    #[test]
    fn control_state_tracks_theme() {
        assert!(Theme::Dark.pressed());
        assert!(!Theme::Light.pressed());
        assert_eq!(Theme::Dark.icon(), "🌙");
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark theme");
    }
}
