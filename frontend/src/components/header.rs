use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-notes-medical"></i>{" Skin Condition Analyzer"}</h1>
            <p class="subtitle">{"Upload a photo, describe your symptoms, review the AI assessment"}</p>
        </header>
    }
}
