use dioxus::prelude::*;
use std::str::FromStr;

#[cfg(target_arch = "wasm32")]
use crate::shared::constants::THEME_STORAGE_KEY;

/// Available themes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }

    /// Get the appropriate default theme based on system preference
    pub fn system_default(is_dark_preferred: bool) -> Theme {
        if is_dark_preferred {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggle(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Ok(Theme::Light), // Default to light
        }
    }
}

/// Theme hook that manages theme state and persistence
pub fn use_theme() -> Signal<Theme> {
    let mut current_theme = use_signal(|| Theme::Light);

    // Initialize theme from localStorage on mount
    use_effect(move || {
        spawn(async move {
            let mut loaded = false;

            #[cfg(target_arch = "wasm32")]
            {
                if let Some(window) = web_sys::window() {
                    if let Ok(Some(storage)) = window.local_storage() {
                        if let Ok(Some(saved)) = storage.get_item(THEME_STORAGE_KEY) {
                            if let Ok(theme) = saved.parse::<Theme>() {
                                current_theme.set(theme);
                                apply_theme_css(theme).await;
                                loaded = true;
                            }
                        }
                    }
                }
            }

            // Fall back to system preference
            if !loaded {
                #[cfg(target_arch = "wasm32")]
                {
                    let script = r#"
                        window.matchMedia('(prefers-color-scheme: dark)').matches
                    "#;
                    if let Ok(result) = document::eval(script).await {
                        if let Some(is_dark) = result.as_bool() {
                            let system_theme = Theme::system_default(is_dark);
                            current_theme.set(system_theme);
                            apply_theme_css(system_theme).await;
                        }
                    }
                }
            }
        });
    });

    current_theme
}

/// Apply theme CSS class to document element
#[cfg(target_arch = "wasm32")]
pub async fn apply_theme_css(theme: Theme) {
    let script = format!(
        r#"
        (function() {{
            const root = document.documentElement;
            root.classList.remove('dark', 'light');
            root.classList.add('{}');
        }})()
    "#,
        theme.as_str()
    );

    let _ = document::eval(&script).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn apply_theme_css(_theme: Theme) {
    // No-op on server
}

/// Save theme to localStorage
#[cfg(target_arch = "wasm32")]
pub async fn save_theme(theme: Theme) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_theme(_theme: Theme) {
    // No-op on server
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_str_defaults_to_light() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("sepia".parse::<Theme>(), Ok(Theme::Light));
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }
}
