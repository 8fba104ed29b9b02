//! Question input for the chat dashboard

use dioxus::prelude::*;
use keyboard_types::Modifiers;

#[cfg(target_arch = "wasm32")]
use js_sys::eval as js_eval;

#[component]
pub fn ChatInput(
    input: Signal<String>,
    is_loading: Signal<bool>,
    on_submit: EventHandler<()>,
) -> Element {
    let mut is_composing = use_signal(|| false);

    // Auto-focus effect
    use_effect(move || {
        if !*is_loading.read() {
            #[cfg(target_arch = "wasm32")]
            {
                let script = r#"
                    setTimeout(() => {
                        const textarea = document.getElementById('chat-input');
                        if (textarea) {
                            textarea.focus();
                        }
                    }, 100);
                "#;
                let _ = js_eval(script);
            }
        }
    });

    // Handle keypress (Enter to send, Shift+Enter for newline)
    let handle_keypress = move |evt: Event<KeyboardData>| {
        if evt.key() == Key::Enter
            && !evt.modifiers().contains(Modifiers::SHIFT)
            && !*is_composing.read()
        {
            evt.prevent_default();
            let input_value = input();
            if !input_value.trim().is_empty() && !*is_loading.read() {
                on_submit.call(());
            }
        }
    };

    let placeholder = if *is_loading.read() {
        "Answering..."
    } else {
        "Ask a clinical question... (Enter to send, Shift+Enter for new line)"
    };

    let has_content = !input().trim().is_empty();

    rsx! {
        div {
            id: "chat-input-container",
            class: "c-chat-input",

            textarea {
                id: "chat-input",
                class: "c-chat-input__textarea",
                value: "{input}",
                placeholder: "{placeholder}",
                disabled: *is_loading.read(),
                rows: "1",
                oninput: move |evt| {
                    input.set(evt.value());
                },
                onkeypress: handle_keypress,
                oncompositionstart: move |_| is_composing.set(true),
                oncompositionend: move |_| is_composing.set(false),
            }

            div { class: "c-chat-input__actions",
                button {
                    class: "btn btn--send btn--icon-only",
                    disabled: !has_content || *is_loading.read(),
                    onclick: move |_evt| {
                        if has_content && !*is_loading.read() {
                            on_submit.call(());
                        }
                    },
                    if *is_loading.read() {
                        span { class: "btn__spinner", "..." }
                    } else {
                        span { class: "btn__icon", "➤" }
                    }
                }
            }
        }
    }
}
