use shared::{Duration, Symptom};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::{Model, Msg};

pub fn render_symptoms_step(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let form = &model.session.form;

    let on_age = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::AgeChanged(input.value())
    });
    let on_duration = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::DurationChanged(select.value())
    });
    let on_notes = link.callback(|e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        Msg::NotesChanged(area.value())
    });

    html! {
        <div id="step-symptoms" class="wizard-step">
            <h2>{"Tell us about your symptoms"}</h2>

            <div class="form-group">
                <label for="age">{"Age"}</label>
                <input
                    id="age"
                    type="number"
                    min="0"
                    max="120"
                    value={form.age.clone()}
                    oninput={on_age}
                />
            </div>

            <div class="form-group">
                <label for="duration">{"How long have you had this condition?"}</label>
                <select id="duration" onchange={on_duration}>
                    { for Duration::ALL.iter().map(|duration| html! {
                        <option
                            value={duration.to_string()}
                            selected={form.duration == *duration}
                        >
                            { duration.label() }
                        </option>
                    })}
                </select>
            </div>

            <fieldset class="form-group symptom-flags">
                <legend>{"Symptoms"}</legend>
                { for Symptom::ALL.iter().map(|symptom| render_symptom_checkbox(model, ctx, *symptom)) }
            </fieldset>

            <div class="form-group">
                <label for="additional-notes">{"Additional notes"}</label>
                <textarea
                    id="additional-notes"
                    rows="3"
                    placeholder="Anything else worth mentioning..."
                    value={form.notes.clone()}
                    oninput={on_notes}
                />
            </div>

            <div class="button-container">
                <button
                    class="back-btn"
                    onclick={link.callback(|_| Msg::ReturnToUpload)}
                    disabled={model.analyzing}
                >
                    <i class="fa-solid fa-arrow-left"></i>{" Back"}
                </button>
                <button
                    id="analyze-button"
                    class="analyze-btn"
                    onclick={link.callback(|_| Msg::Analyze)}
                    disabled={model.analyzing}
                >
                    { render_analyze_button_content(model) }
                </button>
            </div>
        </div>
    }
}

fn render_symptom_checkbox(model: &Model, ctx: &Context<Model>, symptom: Symptom) -> Html {
    let checked = model.session.form.symptoms.is_set(symptom);
    let onchange = ctx.link().callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SymptomToggled(symptom, input.checked())
    });

    html! {
        <label class="symptom-flag" for={symptom.id()}>
            <input
                id={symptom.id()}
                type="checkbox"
                checked={checked}
                onchange={onchange}
            />
            { symptom.label() }
        </label>
    }
}

/// The trigger swaps to a spinner while the request is in flight; the flag
/// driving it is cleared on every exit path.
fn render_analyze_button_content(model: &Model) -> Html {
    if model.analyzing {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze Image"}</> }
    }
}
