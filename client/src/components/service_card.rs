//! Feature card linking to one of the advisory tools.

use leptos::prelude::*;

#[component]
pub fn ServiceCard(
    title: &'static str,
    description: &'static str,
    image: &'static str,
    tag: &'static str,
    href: &'static str,
) -> impl IntoView {
    view! {
        <a class="service-card" href=href>
            <div class="service-card__image">
                <img src=image alt=title loading="lazy"/>
            </div>
            <div class="service-card__body">
                <div class="service-card__header">
                    <h3>{title}</h3>
                    <span class="service-card__tag">{tag}</span>
                </div>
                <p class="muted">{description}</p>
                <span class="service-card__cta">"Try Now →"</span>
            </div>
        </a>
    }
}
