//! Light/dark toggle button.
//!
//! Renders a pulsing placeholder until the theme controller has resolved a
//! theme, so the server markup never guesses the user's preference.

use leptos::prelude::*;
use seaton_web::icon::{IconSize, StrokeWidth};
use seaton_web::theme::ThemeMode;

use crate::components::icon::Icon;
use crate::state::theme::ThemeControl;

#[component]
pub fn ThemeToggle(#[prop(optional, into)] class: String) -> impl IntoView {
    let theme = expect_context::<ThemeControl>();
    let theme_view = theme.view();
    let placeholder_class = format!("theme-toggle theme-toggle--placeholder {class}");
    let button_class = format!("theme-toggle {class}");

    view! {
        <Show
            when=move || theme_view.get().is_ready()
            fallback=move || {
                view! {
                    <div class=placeholder_class.clone() aria-hidden="true">
                        <span class="theme-toggle__pulse"></span>
                    </div>
                }
            }
        >
            <button
                class={
                    let button_class = button_class.clone();
                    move || {
                        if theme_view.get().mode == ThemeMode::Dark {
                            format!("{button_class} theme-toggle--dark")
                        } else {
                            button_class.clone()
                        }
                    }
                }
                aria-label=move || theme_view.get().label
                on:click=move |_| theme.toggle()
            >
                <span class="theme-toggle__glow"></span>
                {move || {
                    let icon = theme_view.get().icon();
                    view! { <Icon name=icon size=IconSize::Lg stroke=StrokeWidth::Medium/> }
                }}
            </button>
        </Show>
    }
}
