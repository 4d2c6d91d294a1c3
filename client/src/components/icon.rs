//! Lucide icon placeholder, expanded client-side by the Lucide script.

use leptos::prelude::*;
use seaton_web::icon::{IconName, IconSize, StrokeWidth};

/// `<i data-lucide=...>` with the size and stroke tables applied.
#[component]
pub fn Icon(
    name: IconName,
    #[prop(optional)] size: IconSize,
    #[prop(optional)] stroke: StrokeWidth,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let px = size.px().to_string();
    view! {
        <i
            class=format!("icon {class}")
            data-lucide=name.lucide_name()
            width=px.clone()
            height=px
            stroke-width=stroke.value().to_string()
            aria-label=label.clone()
            aria-hidden=if label.is_some() { "false" } else { "true" }
        ></i>
    }
}
