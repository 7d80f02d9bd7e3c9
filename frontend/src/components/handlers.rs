use gloo_file::callbacks::read_as_data_url;
use gloo_file::{File, FileReadError};
use gloo_timers::callback::Timeout;
use shared::PredictionResponse;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

use crate::api;
use crate::components::notice::{
    Notice, NoticePhase, NOTICE_ENTER_MS, NOTICE_EXIT_MS, NOTICE_VISIBLE_MS,
};
use crate::error::AnalysisError;
use crate::session::{is_image_mime, SelectedImage, WizardStep};
use crate::{Model, Msg};

pub fn handle_files_chosen(model: &mut Model, ctx: &Context<Model>, files: Vec<File>) -> bool {
    let Some(file) = files.into_iter().next() else {
        return false;
    };
    if !is_image_mime(&file.raw_mime_type()) {
        log::warn!("Rejected non-image file: {}", file.name());
        show_notice(model, ctx, AnalysisError::not_an_image().to_string());
        return true;
    }

    // A new selection supersedes the previous preview and any stale result.
    model.result = None;
    model.session.image = Some(SelectedImage {
        file: file.clone(),
        preview: None,
    });
    let link = ctx.link().clone();
    model.preview_reader = Some(read_as_data_url(&file, move |outcome| {
        link.send_message(Msg::PreviewReady(outcome));
    }));
    true
}

pub fn handle_preview_ready(model: &mut Model, outcome: Result<String, FileReadError>) -> bool {
    model.preview_reader.take();
    match outcome {
        Ok(data_uri) => {
            if let Some(image) = model.session.image.as_mut() {
                image.preview = Some(data_uri);
                true
            } else {
                false
            }
        }
        Err(err) => {
            log::error!("Failed to read image preview: {err}");
            false
        }
    }
}

pub fn handle_reset(model: &mut Model) -> bool {
    model.session.reset();
    model.result = None;
    model.analyzing = false;
    model.preview_reader = None;
    // Any in-flight response is now stale and will be dropped.
    model.request_epoch += 1;
    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.analyzing {
        // A second trigger while a request is pending is ignored.
        return false;
    }
    let Some(image) = model.session.image.as_ref() else {
        show_notice(model, ctx, AnalysisError::no_file().to_string());
        return true;
    };

    model.analyzing = true;
    model.request_epoch += 1;
    let epoch = model.request_epoch;
    let file = image.file.clone();
    let form = model.session.form.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = api::request_prediction(&file, &form).await;
        link.send_message(Msg::AnalysisFinished(epoch, outcome));
    });
    true
}

pub fn handle_analysis_finished(
    model: &mut Model,
    ctx: &Context<Model>,
    epoch: u64,
    outcome: Result<PredictionResponse, AnalysisError>,
) -> bool {
    if epoch != model.request_epoch {
        log::warn!("Dropping analysis response for a reset session");
        return false;
    }
    model.analyzing = false;
    match outcome {
        Ok(result) => {
            model.result = Some(result);
            model.session.show_result();
        }
        Err(err) => {
            log::error!("Analysis failed: {err}");
            show_notice(model, ctx, err.to_string());
        }
    }
    true
}

pub fn show_notice(model: &mut Model, ctx: &Context<Model>, text: impl Into<String>) {
    model.notice = Some(Notice {
        text: text.into(),
        visible: false,
    });
    let link = ctx.link().clone();
    // Mounted hidden first so the enter transition can play. Replacing the
    // timer cancels any chain a previous notice started.
    model.notice_timer = Some(Timeout::new(NOTICE_ENTER_MS, move || {
        link.send_message(Msg::NoticeTransition(NoticePhase::Shown));
    }));
}

pub fn handle_notice_transition(
    model: &mut Model,
    ctx: &Context<Model>,
    phase: NoticePhase,
) -> bool {
    let Some(notice) = model.notice.as_mut() else {
        return false;
    };
    let link = ctx.link().clone();
    match phase {
        NoticePhase::Shown => {
            notice.visible = true;
            model.notice_timer = Some(Timeout::new(NOTICE_VISIBLE_MS, move || {
                link.send_message(Msg::NoticeTransition(NoticePhase::Dismissing));
            }));
        }
        NoticePhase::Dismissing => {
            notice.visible = false;
            model.notice_timer = Some(Timeout::new(NOTICE_EXIT_MS, move || {
                link.send_message(Msg::NoticeTransition(NoticePhase::Cleared));
            }));
        }
        NoticePhase::Cleared => {
            model.notice = None;
            model.notice_timer.take();
        }
    }
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            return handle_files_chosen(model, ctx, collect_files(&file_list));
        }
    }
    true
}

pub fn handle_paste(model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    // Pasting only selects a file while the upload step is showing.
    if model.session.step != WizardStep::SelectImage {
        return false;
    }
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                return handle_files_chosen(model, ctx, collect_files(&file_list));
            }
        }
    }
    false
}

pub fn collect_files(file_list: &FileList) -> Vec<File> {
    (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .map(File::from)
        .collect()
}

pub fn handle_toggle_theme(model: &mut Model) -> bool {
    let body = web_sys::window().unwrap().document().unwrap().body().unwrap();

    if model.theme == "light" {
        model.theme = "dark".to_string();
        body.class_list().add_1("dark-mode").unwrap();
    } else {
        model.theme = "light".to_string();
        body.class_list().remove_1("dark-mode").unwrap();
    }

    true
}
