use crate::shared::hooks::{apply_theme_css, save_theme, use_theme, Theme};
use dioxus::prelude::*;

/// Theme toggle component for switching between light and dark.
/// Features animated sun/moon with clouds and stars.
#[component]
pub fn ThemeToggle() -> Element {
    let mut current_theme = use_theme();

    let is_currently_light = current_theme() == Theme::Light;

    let toggle_theme = move |_| {
        let new_theme = current_theme().toggle();
        current_theme.set(new_theme);

        spawn(async move {
            apply_theme_css(new_theme).await;
            save_theme(new_theme).await;
        });
    };

    // Tooltip shows target state (what will happen on click)
    let target_theme = current_theme().toggle();
    let tooltip = format!("Switch to {} mode", target_theme.display_name().to_lowercase());

    let toggle_class = if is_currently_light {
        "c-theme-toggle c-theme-toggle--light"
    } else {
        "c-theme-toggle"
    };

    rsx! {
        div {
            class: "{toggle_class}",
            "data-tooltip": "{tooltip}",
            role: "button",
            tabindex: "0",
            aria_label: "Toggle light/dark mode",
            onclick: toggle_theme,

            // Ball (sun/moon)
            div { class: "c-theme-toggle__ball" }

            // Stars (visible in dark mode)
            div { class: "c-theme-toggle__stars",
                span { class: "c-theme-toggle__star" }
                span { class: "c-theme-toggle__star" }
                span { class: "c-theme-toggle__star" }
            }

            // Clouds (visible in light mode)
            div { class: "c-theme-toggle__clouds",
                span { class: "c-theme-toggle__cloud" }
                span { class: "c-theme-toggle__cloud" }
            }
        }
    }
}
