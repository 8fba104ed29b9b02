//! Profile panel: clinician details and specialty tags that feed
//! personalized suggestions.

use crate::app::components::{ErrorMessage, LoadingText};
use crate::domain::models::UserProfile;
use crate::server_fns::{get_profile, update_profile};
use crate::shared::hooks::{clear_session_marker, ensure_session_marker};
use dioxus::prelude::*;

#[component]
pub fn ProfilePanel() -> Element {
    let user_id = use_signal(ensure_session_marker);
    let mut email = use_signal(String::new);
    let mut display_name = use_signal(String::new);
    let mut occupation = use_signal(String::new);
    let mut institution = use_signal(String::new);
    let mut specialties = use_signal(Vec::<String>::new);
    let mut specialty_input = use_signal(String::new);
    let mut created_at = use_signal(|| None::<chrono::DateTime<chrono::Utc>>);
    let mut is_loading = use_signal(|| true);
    let mut is_saving = use_signal(|| false);
    let mut saved_notice = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    use_effect(move || {
        spawn(async move {
            match get_profile(user_id()).await {
                Ok(Some(profile)) => {
                    email.set(profile.email);
                    display_name.set(profile.display_name.unwrap_or_default());
                    occupation.set(profile.occupation.unwrap_or_default());
                    institution.set(profile.institution.unwrap_or_default());
                    specialties.set(profile.specialties);
                    created_at.set(Some(profile.created_at));
                }
                Ok(None) => {
                    // First visit, everything starts blank
                }
                Err(e) => {
                    tracing::error!("Failed to load profile: {}", e);
                    error.set(Some("Could not load your profile.".to_string()));
                }
            }
            is_loading.set(false);
        });
    });

    let mut add_specialty = move || {
        let tag = specialty_input.read().trim().to_string();
        if tag.is_empty() {
            return;
        }
        let already_present = specialties
            .read()
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&tag));
        if !already_present {
            specialties.write().push(tag);
        }
        specialty_input.set(String::new());
    };

    let save = move |_| {
        let current_email = email.read().trim().to_string();
        if current_email.is_empty() {
            error.set(Some("Email is required.".to_string()));
            return;
        }

        is_saving.set(true);
        saved_notice.set(false);
        error.set(None);
        spawn(async move {
            let mut profile = UserProfile::new(user_id(), current_email);
            profile.display_name = none_if_blank(&display_name.read());
            profile.occupation = none_if_blank(&occupation.read());
            profile.institution = none_if_blank(&institution.read());
            profile.specialties = specialties.read().clone();
            if let Some(original) = created_at() {
                profile.created_at = original;
            }

            match update_profile(profile).await {
                Ok(saved) => {
                    created_at.set(Some(saved.created_at));
                    saved_notice.set(true);
                }
                Err(e) => {
                    tracing::error!("Failed to save profile: {}", e);
                    error.set(Some("Could not save your profile.".to_string()));
                }
            }
            is_saving.set(false);
        });
    };

    // Other tabs log out via the storage event; this tab reloads into a
    // fresh anonymous session.
    let sign_out = move |_| {
        clear_session_marker();
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    let avatar_initials = {
        let mut preview = UserProfile::new(user_id(), email.read().clone());
        preview.display_name = none_if_blank(&display_name.read());
        preview.initials()
    };

    rsx! {
        div { class: "c-profile-panel",
            header { class: "c-profile-panel__header",
                div { class: "c-profile-panel__avatar", "{avatar_initials}" }
                h1 { class: "c-profile-panel__title", "Your Profile" }
            }

            if is_loading() {
                LoadingText { message: "Loading profile..." }
            } else {
                div { class: "c-profile-panel__form",
                    label { class: "c-profile-panel__label", "Email" }
                    input {
                        r#type: "email",
                        class: "c-profile-panel__input",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }

                    label { class: "c-profile-panel__label", "Display name" }
                    input {
                        r#type: "text",
                        class: "c-profile-panel__input",
                        placeholder: "Dr. Sarah Gonzalez",
                        value: "{display_name}",
                        oninput: move |evt| display_name.set(evt.value()),
                    }

                    label { class: "c-profile-panel__label", "Occupation" }
                    input {
                        r#type: "text",
                        class: "c-profile-panel__input",
                        placeholder: "physician, pharmacist, nurse practitioner...",
                        value: "{occupation}",
                        oninput: move |evt| occupation.set(evt.value()),
                    }

                    label { class: "c-profile-panel__label", "Institution" }
                    input {
                        r#type: "text",
                        class: "c-profile-panel__input",
                        value: "{institution}",
                        oninput: move |evt| institution.set(evt.value()),
                    }

                    label { class: "c-profile-panel__label", "Specialties" }
                    div { class: "c-profile-panel__tags",
                        for (index, specialty) in specialties.read().iter().enumerate() {
                            span { class: "c-profile-panel__tag",
                                "{specialty}"
                                button {
                                    class: "c-profile-panel__tag-remove",
                                    aria_label: "Remove {specialty}",
                                    onclick: move |_| {
                                        specialties.write().remove(index);
                                    },
                                    "×"
                                }
                            }
                        }
                    }
                    div { class: "c-profile-panel__tag-input-row",
                        input {
                            r#type: "text",
                            class: "c-profile-panel__input",
                            placeholder: "Add a specialty, e.g. cardiology",
                            value: "{specialty_input}",
                            oninput: move |evt| specialty_input.set(evt.value()),
                            onkeydown: move |evt| {
                                if evt.key() == Key::Enter {
                                    evt.prevent_default();
                                    add_specialty();
                                }
                            },
                        }
                        button {
                            class: "btn btn--secondary",
                            onclick: move |_| add_specialty(),
                            "Add"
                        }
                    }

                    if let Some(message) = error.read().clone() {
                        ErrorMessage { message }
                    }
                    if saved_notice() {
                        div { class: "c-profile-panel__saved", "✓ Profile saved" }
                    }

                    button {
                        class: "btn btn--primary c-profile-panel__save",
                        disabled: is_saving(),
                        onclick: save,
                        if is_saving() { "Saving..." } else { "Save profile" }
                    }
                }
            }

            div { class: "c-profile-panel__session",
                p { class: "c-profile-panel__session-hint",
                    "Your conversations and this profile are tied to an anonymous session stored in this browser."
                }
                button {
                    class: "btn btn--secondary",
                    onclick: sign_out,
                    "Sign out of this browser"
                }
            }
        }
    }
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
