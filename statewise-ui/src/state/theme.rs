//! Theme Context
//!
//! The theme is a signal in context. The `<body>` class follows it through
//! an effect, and the choice is kept in local storage.

use leptos::*;
use statewise_core::Theme;

/// Theme handed to every component
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
}

impl ThemeContext {
    pub fn toggle(&self) {
        self.theme.update(|t| *t = t.toggled());
    }
}

/// Provide the theme context, starting from the stored theme
pub fn provide_theme() -> ThemeContext {
    let context = ThemeContext {
        theme: create_rw_signal(stored_theme()),
    };

    create_effect(move |_| {
        let theme = context.theme.get();
        apply_body_class(theme);
        persist_theme(theme);
    });

    provide_context(context);
    context
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

fn stored_theme() -> Theme {
    let stored = storage().and_then(|s| s.get_item(Theme::STORAGE_KEY).ok().flatten());
    Theme::from_stored(stored.as_deref())
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(Theme::STORAGE_KEY, theme.as_str());
    }
}

fn apply_body_class(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };

    let classes = body.class_list();
    for class in [Theme::Light, Theme::Dark].into_iter().filter_map(Theme::body_class) {
        let _ = classes.remove_1(class);
    }
    if let Some(class) = theme.body_class() {
        let _ = classes.add_1(class);
    }
}
