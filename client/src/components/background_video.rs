//! Adaptive background video slot.
//!
//! SYSTEM CONTEXT
//! ==============
//! Server rendering emits the `<video>` with its `<source>` list and the
//! hidden entry pose. On the client, once both node refs resolve, device
//! signals are gathered (battery status is async) and the core
//! `MediaController` takes over the element. Unmounting the component
//! unmounts the controller.

use leptos::prelude::*;
use seaton_web::media::BackgroundVideoProps;

use crate::state::media::{BackdropView, fallback_style, preload_hint, video_style};
use crate::util::config::SiteSettings;

#[component]
pub fn BackgroundVideo(
    props: BackgroundVideoProps,
    #[prop(optional)] blur_px: f64,
    #[prop(default = 0.3)] overlay_opacity: f64,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let settings = expect_context::<SiteSettings>();
    let config = settings.config.media;
    let backdrop = RwSignal::new(BackdropView::default());
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let video_ref = NodeRef::<leptos::html::Video>::new();

    let initial_style = video_style(config.hidden, blur_px);
    let preload = preload_hint(props.priority);
    let poster = props.poster.clone();
    let sources = props.sources.clone();

    #[cfg(feature = "hydrate")]
    {
        use std::cell::Cell;
        use std::rc::Rc;

        use seaton_web::media::MediaController;

        use crate::util::video::{device_profile, mount_background_video, with_battery};

        let controller = StoredValue::new_local(None::<MediaController>);
        let mounting = Rc::new(Cell::new(false));
        Effect::new(move || {
            let (Some(video), Some(container)) = (video_ref.get(), container_ref.get()) else {
                return;
            };
            if mounting.replace(true) {
                return;
            }
            let props = props.clone();
            let config = config.clone();
            leptos::task::spawn_local(async move {
                let device = with_battery(device_profile()).await;
                let mounted = mount_background_video(video, container.into(), props, config, device, backdrop);
                if controller.try_set_value(Some(mounted)).is_some() {
                    leptos::logging::log!("background video removed before mount finished");
                }
            });
        });

        let gesture = move || {
            controller.try_with_value(|slot| {
                if let Some(controller) = slot {
                    controller.on_user_gesture();
                }
            });
        };
        let pointer = window_event_listener(leptos::ev::pointerdown, move |_| gesture());
        let key = window_event_listener(leptos::ev::keydown, move |_| gesture());

        on_cleanup(move || {
            pointer.remove();
            key.remove();
            if let Some(Some(mounted)) = controller.try_update_value(Option::take) {
                mounted.unmount();
            }
        });
    }

    view! {
        <div class=format!("background-video {class}") node_ref=container_ref>
            {move || {
                backdrop
                    .with(|b| b.fallback_image().map(str::to_owned))
                    .map(|url| {
                        view! {
                            <div
                                class="background-video__fallback"
                                style=fallback_style(&url, overlay_opacity, blur_px)
                            ></div>
                        }
                    })
            }}
            <video
                node_ref=video_ref
                class=move || {
                    if backdrop.with(BackdropView::shows_video) {
                        "background-video__media"
                    } else {
                        "background-video__media background-video__media--hidden"
                    }
                }
                autoplay
                muted
                loop
                playsinline
                preload=preload
                poster=poster
                style=initial_style
            >
                {sources
                    .into_iter()
                    .map(|source| view! { <source src=source.src type=source.mime_type media=source.media/> })
                    .collect_view()}
            </video>
        </div>
    }
}
