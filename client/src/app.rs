//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};

use crate::components::background_video::BackgroundVideo;
use crate::components::theme_toggle::ThemeToggle;
use crate::state::theme::{ThemeControl, ThemeView};
use crate::util::config::{SITE_JSON, SiteSettings};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en" class="dark" style="color-scheme: dark">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Parses the embedded site settings once and provides them, together with
/// the theme control handle, to every child.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let settings = SiteSettings::load(SITE_JSON);
    let hero = settings.hero.clone();
    #[cfg(feature = "hydrate")]
    let theme_config = settings.config.theme.clone();
    provide_context(settings);
    let theme = ThemeControl::new(RwSignal::new(ThemeView::default()));
    provide_context(theme);

    // The controller touches storage and the document, so it only exists
    // once hydrated. Server markup keeps the toggle in its placeholder.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if !theme.is_installed() {
            theme.install(crate::util::color_scheme::browser_theme_controller(theme_config.clone(), theme.view()));
        }
    });
    on_cleanup(move || theme.shutdown());

    view! {
        <Stylesheet id="leptos" href="/pkg/seaton-web.css"/>
        <Title text="Seaton Logistics"/>

        <header class="site-header">
            <ThemeToggle/>
        </header>
        <main>
            <section class="hero">
                <BackgroundVideo props=hero/>
            </section>
        </main>
    }
}
