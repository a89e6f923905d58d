//! Site footer.

use leptos::prelude::*;

use crate::routes::AppRoute;

const QUICK_LINKS: [AppRoute; 3] = [AppRoute::Home, AppRoute::Detection, AppRoute::About];

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <div class="footer__grid">
                <div class="footer__brand">
                    <div class="footer__title">"🌿 Krishi Mithra AI"</div>
                    <p class="muted">
                        "Empowering farmers with AI-powered crop disease detection and advisory services for sustainable agriculture."
                    </p>
                </div>
                <div>
                    <h3>"Quick Links"</h3>
                    <div class="footer__links">
                        {QUICK_LINKS
                            .into_iter()
                            .map(|route| view! { <a href=route.path()>{route.label()}</a> })
                            .collect_view()}
                    </div>
                </div>
                <div>
                    <h3>"Contact"</h3>
                    <p class="muted">"support@krishimithra.ai"</p>
                    <p class="muted">"Agricultural Research Center"</p>
                </div>
            </div>
            <p class="footer__legal muted">"© Krishi Mithra AI. All rights reserved."</p>
        </footer>
    }
}
