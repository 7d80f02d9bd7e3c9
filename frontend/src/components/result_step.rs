use shared::{display_label, percent, PredictionResponse};
use yew::prelude::*;

use crate::session::SymptomForm;
use crate::{Model, Msg};

pub fn render_result_step(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(result) = &model.result else {
        // ViewResult is only entered on a successful analysis.
        return html! {};
    };
    let confidence = result.confidence_percent();

    html! {
        <div id="result-area" class="wizard-step results-container">
            <h2>{"Analysis Result"}</h2>
            <p id="prediction-text" class="prediction-text">
                { display_label(&result.predicted_class) }
            </p>

            <div class="confidence-meter">
                <div class="meter">
                    <div
                        id="confidence-bar"
                        class="meter-fill"
                        style={format!("width: {confidence}%")}
                        aria-valuenow={confidence.to_string()}
                    ></div>
                </div>
                <div id="confidence-text" class="meter-value">
                    { format!("{confidence}% confidence") }
                </div>
            </div>

            { render_submitted_summary(&model.session.form) }
            { render_probability_list(result) }

            <button class="analyze-btn" onclick={ctx.link().callback(|_| Msg::Reset)}>
                <i class="fa-solid fa-rotate-left"></i>{" Start Over"}
            </button>
        </div>
    }
}

/// Restates what was submitted alongside the verdict.
fn render_submitted_summary(form: &SymptomForm) -> Html {
    html! {
        <div id="symptoms-summary" class="symptoms-summary">
            <div class="list-group-item">
                <strong>{"Age: "}</strong>{ format!("{} years", form.age) }
            </div>
            <div class="list-group-item">
                <strong>{"Duration: "}</strong>{ form.duration.label() }
            </div>
            <div class="list-group-item">
                <strong>{"Symptoms: "}</strong>{ form.symptoms.summary() }
            </div>
            {
                if form.notes.is_empty() {
                    html! {}
                } else {
                    html! {
                        <div class="list-group-item">
                            <strong>{"Additional Notes: "}</strong>{ form.notes.clone() }
                        </div>
                    }
                }
            }
        </div>
    }
}

fn render_probability_list(result: &PredictionResponse) -> Html {
    html! {
        <div class="detailed-results">
            <h3>{"All class probabilities"}</h3>
            <div id="probability-list" class="probability-list">
                { for result.ranked_probabilities().into_iter().map(|(label, probability)| {
                    html! {
                        <div class="list-group-item probability-row" key={label.clone()}>
                            <span>{ display_label(&label) }</span>
                            <span class="badge">{ format!("{}%", percent(probability)) }</span>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
