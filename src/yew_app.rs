use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Interval;
use web_sys::{Element, Event};
use yew::prelude::*;

use greeting_core::{intent_from_dot, intent_from_wheel, BackgroundRotation, CarouselSettings};

use crate::app_runtime;
use crate::carousel_runtime::CarouselDriver;
use crate::input::{changed_touch_screen_x, wheel_delta_y};
use crate::reveal_view::use_reveal_on_visible;

const FLOATING_ITEMS: &[(&str, &str)] = &[
    ("flower flower-1", "🌸"),
    ("flower flower-2", "🌺"),
    ("flower flower-3", "🌹"),
    ("flower flower-4", "🌻"),
    ("flower flower-5", "🌷"),
    ("heart heart-1", "💖"),
    ("heart heart-2", "💝"),
    ("heart heart-3", "💕"),
    ("heart heart-4", "💗"),
    ("heart heart-5", "💓"),
    ("sparkle sparkle-1", "✨"),
    ("sparkle sparkle-2", "⭐"),
    ("sparkle sparkle-3", "💫"),
    ("butterfly butterfly-1", "🦋"),
    ("butterfly butterfly-2", "🦋"),
];
const CELEBRATION_ICONS: &[&str] = &["🎈", "🎁", "🎊", "🎉", "🍰"];
const FOOTER_HEARTS: &[&str] = &["💖", "💝", "💕", "💗", "💓"];

#[derive(Properties, PartialEq)]
struct BackgroundProps {
    images: Rc<Vec<String>>,
    interval_ms: u32,
}

#[function_component(BackgroundRotator)]
fn background_rotator(props: &BackgroundProps) -> Html {
    let index = use_state(|| 0usize);
    {
        let index = index.clone();
        use_effect_with(
            (props.images.len(), props.interval_ms),
            move |(len, interval_ms)| {
                let mut rotation = BackgroundRotation::new(*len);
                let interval = (!rotation.is_empty()).then(|| {
                    Interval::new(*interval_ms, move || {
                        index.set(rotation.advance());
                    })
                });
                move || drop(interval)
            },
        );
    }
    let active = *index;
    html! {
        <div class="background-container">
            { for props.images.iter().enumerate().map(|(i, src)| {
                let class = classes!("background-image", (i == active).then_some("active"));
                html! {
                    <div key={src.clone()} {class} style={format!("background-image: url({src})")} />
                }
            }) }
        </div>
    }
}

#[function_component(FloatingElements)]
fn floating_elements() -> Html {
    html! {
        <div class="floating-elements">
            { for FLOATING_ITEMS.iter().map(|(class, glyph)| html! {
                <div class={*class}>{ *glyph }</div>
            }) }
        </div>
    }
}

#[function_component(BirthdayCard)]
fn birthday_card() -> Html {
    use_reveal_on_visible(".birthday-card");
    html! {
        <div class="container">
            <div class="birthday-card">
                <div class="card-header">
                    <div class="title-decoration">
                        <span class="decoration-star">{ "⭐" }</span>
                        <h1 class="birthday-title">{ "Happy Birthday! 🎂" }</h1>
                        <span class="decoration-star">{ "⭐" }</span>
                    </div>
                    <div class="birthday-subtitle">
                        { "Wishing you a day filled with joy and laughter! 🎉" }
                    </div>
                </div>
                <div class="card-content">
                    <div class="message-section">
                        <p class="birthday-message">
                            { "Chinnoda❤️" }<br/><br/>
                            { "On this special day, I want you to know how much you mean to me. \
                               Your friendship has brought so much happiness into my life, and I'm \
                               grateful for every moment we've shared together." }<br/><br/>
                            { "May your birthday be as wonderful and beautiful as you are! Here's to \
                               another amazing year ahead filled with love, success, and countless \
                               beautiful memories." }<br/><br/>
                            { "With lots of love and warmest wishes," }<br/>
                            { "Your Friend 💖" }
                        </p>
                    </div>
                    <div class="celebration-section">
                        <div class="celebration-icons">
                            { for CELEBRATION_ICONS.iter().map(|icon| html! {
                                <span class="celebration-icon">{ *icon }</span>
                            }) }
                        </div>
                    </div>
                </div>
                <div class="card-footer">
                    <div class="footer-hearts">
                        { for FOOTER_HEARTS.iter().map(|heart| html! {
                            <span class="footer-heart">{ *heart }</span>
                        }) }
                    </div>
                    <p class="footer-text">{ "May all your dreams come true! ✨" }</p>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct GalleryProps {
    photos: Rc<Vec<String>>,
    settings: CarouselSettings,
}

#[function_component(Gallery)]
fn gallery(props: &GalleryProps) -> Html {
    use_reveal_on_visible(".gallery-section");
    let driver = use_memo(
        (props.photos.len(), props.settings),
        |(len, settings)| match CarouselDriver::new(*len, *settings) {
            Ok(driver) => Some(driver),
            Err(err) => {
                gloo::console::warn!("gallery disabled", err.to_string());
                None
            }
        },
    );
    // Mirrors the controller index so accepted moves re-render.
    let shown_index = use_state_eq(|| 0usize);
    let gallery_ref = use_node_ref();
    {
        let shown_index = shown_index.clone();
        let gallery_ref = gallery_ref.clone();
        use_effect_with(driver.clone(), move |driver| {
            let driver = (**driver).clone();
            let mut listeners = Vec::new();
            if let (Some(driver), Some(element)) = (driver.as_ref(), gallery_ref.cast::<Element>()) {
                driver.set_change_hook(Some(Rc::new(move |next| shown_index.set(next))));
                listeners = gallery_listeners(&element, driver);
            }
            move || {
                drop(listeners);
                if let Some(driver) = driver {
                    driver.shutdown();
                }
            }
        });
    }

    let Some(driver) = (*driver).clone() else {
        return html! { <div class="gallery-section" /> };
    };
    let dots = (0..driver.item_count())
        .map(|i| {
            let class = classes!("nav-dot", driver.is_active_dot(i).then_some("active"));
            let on_dot = driver.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                on_dot.submit(intent_from_dot(i));
            });
            html! { <span key={i} {class} {onclick} /> }
        })
        .collect::<Html>();

    html! {
        <div class="gallery-section">
            <div class="gallery-header">
                <h2 class="gallery-title">{ "📸 Special One 💕" }</h2>
                <p class="gallery-subtitle">{ "Scroll to see more photos" }</p>
            </div>
            <div class="photo-counter">{ driver.counter_label() }</div>
            <div class="photo-gallery" ref={gallery_ref}>
                <div class="gallery-container" style={driver.translate_style()}>
                    { for props.photos.iter().enumerate().map(|(i, src)| html! {
                        <div class="photo-item" key={src.clone()}>
                            <img src={src.clone()} alt={format!("Memory {}", i + 1)} />
                        </div>
                    }) }
                </div>
            </div>
            <div class="gallery-navigation">
                <div class="nav-dots">{ dots }</div>
            </div>
        </div>
    }
}

fn gallery_listeners(element: &Element, driver: &CarouselDriver) -> Vec<EventListener> {
    let on_wheel = {
        let driver = driver.clone();
        EventListener::new_with_options(
            element,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                event.prevent_default();
                if let Some(delta) = wheel_delta_y(event) {
                    driver.submit(intent_from_wheel(delta));
                }
            },
        )
    };
    let on_touch_start = {
        let driver = driver.clone();
        EventListener::new(element, "touchstart", move |event: &Event| {
            driver.touch_start(changed_touch_screen_x(event));
        })
    };
    let on_touch_end = {
        let driver = driver.clone();
        EventListener::new(element, "touchend", move |event: &Event| {
            driver.touch_end(changed_touch_screen_x(event));
        })
    };
    vec![on_wheel, on_touch_start, on_touch_end]
}

#[function_component(SpecialMessage)]
fn special_message() -> Html {
    use_reveal_on_visible(".message-card");
    html! {
        <div class="special-message-section">
            <div class="message-card">
                <div class="message-icon">{ "💌" }</div>
                <h3 class="message-title">{ "A Special Note" }</h3>
                <p class="special-message">
                    { "Every moment with you is a treasure, every laugh we share is precious, and \
                       every memory we create together is priceless. You make the world a more \
                       beautiful place just by being in it! 🌍✨" }
                </p>
                <div class="message-decoration">
                    <span class="decoration-heart">{ "💖" }</span>
                    <span class="decoration-flower">{ "🌺" }</span>
                    <span class="decoration-heart">{ "💖" }</span>
                </div>
            </div>
        </div>
    }
}

#[function_component(App)]
pub(crate) fn app() -> Html {
    let config = use_memo((), |_| app_runtime::page_config());
    let backgrounds = use_memo((), {
        let config = config.clone();
        move |_| config.backgrounds.clone()
    });
    let photos = use_memo((), {
        let config = config.clone();
        move |_| config.photos.clone()
    });
    html! {
        <>
            <BackgroundRotator images={backgrounds} interval_ms={config.background_interval_ms} />
            <FloatingElements />
            <BirthdayCard />
            <Gallery photos={photos} settings={config.carousel} />
            <SpecialMessage />
        </>
    }
}

pub(crate) fn run() {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("app"))
    else {
        yew::Renderer::<App>::new().render();
        return;
    };
    yew::Renderer::<App>::with_root(root).render();
}
