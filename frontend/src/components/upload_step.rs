use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

use crate::components::handlers::collect_files;
use crate::{Model, Msg};

pub fn render_upload_step(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let files = input
            .files()
            .map(|list| collect_files(&list))
            .unwrap_or_default();
        // Clearing the input lets the same file be re-picked later.
        input.set_value("");
        Msg::FilesChosen(files)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    let trigger_file_input = Callback::from(|_: MouseEvent| {
        if let Some(input) = web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .get_element_by_id("file-input")
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <div id="step-upload" class="wizard-step">
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="upload-area"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={trigger_file_input}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop a photo of the affected area, paste, or click"}</p>
                    <p class="file-types">{"Supported formats: JPG, PNG, WEBP, GIF"}</p>
                </div>
            </div>

            { render_preview(model, ctx) }
        </div>
    }
}

fn render_preview(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(image) = &model.session.image else {
        return html! {};
    };

    html! {
        <div id="preview-area" class="preview-area">
            {
                match &image.preview {
                    Some(data_uri) => html! {
                        <img
                            id="image-preview"
                            class="image-preview"
                            src={data_uri.clone()}
                            alt="Selected image preview"
                        />
                    },
                    None => html! {
                        <div class="loading-preview">
                            <i class="fa-solid fa-spinner fa-spin"></i>
                            <p>{"Loading preview..."}</p>
                        </div>
                    },
                }
            }
            <p class="selected-file-name">{ image.file.name() }</p>
            <button
                class="analyze-btn"
                onclick={ctx.link().callback(|_| Msg::AdvanceToSymptoms)}
            >
                {"Continue "}<i class="fa-solid fa-arrow-right"></i>
            </button>
        </div>
    }
}
