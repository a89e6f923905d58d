//! Static "About" page.

use leptos::prelude::*;

const HIGHLIGHTS: [(&str, &str, &str); 3] = [
    (
        "🎯",
        "Accurate Detection",
        "Deep learning models trained on thousands of crop images identify diseases with over 90% accuracy.",
    ),
    (
        "💡",
        "Expert Advisory",
        "Instant, actionable advice on remedies, pesticides, and preventive measures for detected diseases.",
    ),
    (
        "🧑‍🌾",
        "Farmer-Friendly",
        "A simple interface that needs no technical expertise. Just upload and get results.",
    ),
];

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="page page--narrow">
            <header class="page__header">
                <h1>"About Krishi Mithra AI"</h1>
                <p class="muted">"Empowering farmers with artificial intelligence"</p>
            </header>

            <div class="card">
                <h2>"About Us"</h2>
                <p>
                    "Krishi Mithra AI is a team of agricultural scientists, machine learning engineers and software developers building easy-to-use AI tools for smallholder and commercial farmers. Our goal is to reduce crop losses by making fast disease detection and practical advice available from any phone or computer."
                </p>
                <p>
                    "Upload a leaf image and receive an instant diagnosis with recommended treatment steps. Images are processed securely and any data sharing is opt-in."
                </p>
            </div>

            <div class="card">
                <h2>"Our Mission"</h2>
                <p>
                    "Agriculture is the cornerstone of the Indian economy, but crop diseases remain a major threat. Manual inspection is slow, subjective and hard to scale. We use computer vision to spot disease from a single photo of a leaf and pair it with immediate, actionable advice."
                </p>
            </div>

            <div class="card-grid card-grid--three">
                {HIGHLIGHTS
                    .into_iter()
                    .map(|(icon, title, body)| {
                        view! {
                            <div class="card highlight">
                                <div class="highlight__icon">{icon}</div>
                                <h3>{title}</h3>
                                <p class="muted">{body}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
