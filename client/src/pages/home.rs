//! Landing page with one card per advisory tool.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::service_card::ServiceCard;
use crate::routes::AppRoute;

pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub tag: &'static str,
    pub route: AppRoute,
}

pub const FEATURES: [Feature; 4] = [
    Feature {
        title: "Crop Disease Detection",
        description: "Our flagship feature. Upload a photo of your crop leaf to instantly detect diseases and get treatment remedies.",
        image: "https://images.unsplash.com/photo-1615811361269-6c8731c7f526?auto=format&fit=crop&q=80&w=1000",
        tag: "Main Feature",
        route: AppRoute::Detection,
    },
    Feature {
        title: "Fertilizer Recommender",
        description: "Get precise fertilizer recommendations based on your soil's nitrogen, phosphorus, and potassium levels.",
        image: "https://images.unsplash.com/photo-1585314062340-f1a5a7c9328d?auto=format&fit=crop&q=80&w=1000",
        tag: "Soil Health",
        route: AppRoute::Fertilizer,
    },
    Feature {
        title: "Crop Recommender",
        description: "Suggests the most suitable crops for your specific weather and soil conditions.",
        image: "https://images.unsplash.com/photo-1625246333195-5840507993eb?auto=format&fit=crop&q=80&w=1000",
        tag: "Smart Planning",
        route: AppRoute::CropRecommend,
    },
    Feature {
        title: "AI Assistant",
        description: "Have questions about farming? Ask our AI assistant for instant agricultural advice and tips.",
        image: "https://images.unsplash.com/photo-1535378437327-b7128d63743b?auto=format&fit=crop&q=80&w=1000",
        tag: "24/7 Support",
        route: AppRoute::Assistant,
    },
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="page">
            <header class="hero">
                <span class="hero__badge">"🌱 Smart Agriculture"</span>
                <h1>"Krishi Mithra AI"</h1>
                <p class="muted">
                    "Empowering farmers with AI-driven tools for disease detection, soil analysis, and smart crop planning."
                </p>
            </header>

            <div class="card-grid">
                {FEATURES
                    .iter()
                    .map(|f| {
                        view! {
                            <ServiceCard
                                title=f.title
                                description=f.description
                                image=f.image
                                tag=f.tag
                                href=f.route.path()
                            />
                        }
                    })
                    .collect_view()}
            </div>

            <a class="fab" href=AppRoute::Assistant.path()>"💬 Ask AI Assistant"</a>
        </section>
    }
}
