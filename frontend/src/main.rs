use std::str::FromStr;

use gloo_events::EventListener;
use gloo_file::callbacks::FileReader;
use gloo_file::{File, FileReadError};
use gloo_timers::callback::Timeout;
use shared::{Duration, PredictionResponse, Symptom};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

mod api;
mod components;
mod error;
mod session;

use components::chat_widget::ChatWidget;
use components::clinic_finder::ClinicFinder;
use components::notice::{Notice, NoticePhase};
use components::{
    handlers, header, notice, result_step, symptoms_step, theme_toggle, upload_step,
};
use error::AnalysisError;
use session::{UploadSession, WizardStep};

pub enum Msg {
    // File selection
    FilesChosen(Vec<File>),
    PreviewReady(Result<String, FileReadError>),

    // Wizard navigation
    AdvanceToSymptoms,
    ReturnToUpload,
    Reset,

    // Intake form
    AgeChanged(String),
    DurationChanged(String),
    SymptomToggled(Symptom, bool),
    NotesChanged(String),

    // Analysis round trip
    Analyze,
    AnalysisFinished(u64, Result<PredictionResponse, AnalysisError>),

    // Transient notices
    NoticeTransition(NoticePhase),

    // UI states
    SetDragging(bool),
    ToggleTheme,

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

/// Root component. Owns the wizard session; the DOM renders from it and is
/// never read back as state.
pub struct Model {
    pub(crate) session: UploadSession,
    pub(crate) result: Option<PredictionResponse>,
    pub(crate) analyzing: bool,
    // Bumped on every request and on reset; responses from an older epoch
    // are dropped as stale.
    pub(crate) request_epoch: u64,
    pub(crate) notice: Option<Notice>,
    pub(crate) notice_timer: Option<Timeout>,
    pub(crate) is_dragging: bool,
    pub(crate) theme: String,
    pub(crate) preview_reader: Option<FileReader>,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let paste_listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::HandlePaste(clipboard_event.clone()));
            }
        });

        Self {
            session: UploadSession::new(),
            result: None,
            analyzing: false,
            request_epoch: 0,
            notice: None,
            notice_timer: None,
            is_dragging: false,
            theme: "light".to_string(),
            preview_reader: None,
            paste_listener: Some(paste_listener),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // File selection
            Msg::FilesChosen(files) => handlers::handle_files_chosen(self, ctx, files),
            Msg::PreviewReady(outcome) => handlers::handle_preview_ready(self, outcome),

            // Wizard navigation
            Msg::AdvanceToSymptoms => {
                self.session.advance_to_symptoms();
                true
            }
            Msg::ReturnToUpload => {
                self.session.return_to_upload();
                true
            }
            Msg::Reset => handlers::handle_reset(self),

            // Intake form
            Msg::AgeChanged(age) => {
                self.session.form.age = age;
                true
            }
            Msg::DurationChanged(token) => {
                self.session.form.duration = Duration::from_str(&token).unwrap_or_default();
                true
            }
            Msg::SymptomToggled(symptom, value) => {
                self.session.form.symptoms.set(symptom, value);
                true
            }
            Msg::NotesChanged(notes) => {
                self.session.form.notes = notes;
                true
            }

            // Analysis round trip
            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::AnalysisFinished(epoch, outcome) => {
                handlers::handle_analysis_finished(self, ctx, epoch, outcome)
            }

            // Transient notices
            Msg::NoticeTransition(phase) => handlers::handle_notice_transition(self, ctx, phase),

            // UI states
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header() }
                { theme_toggle::render_theme_toggle(&self.theme, ctx.link()) }

                <main class="main-content">
                    { self.render_active_step(ctx) }
                    { notice::render_notice(self) }
                    <ClinicFinder />
                </main>

                <ChatWidget />

                <footer class="app-footer">
                    <p>{"Skin Condition Analyzer | Educational use only, not a medical diagnosis"}</p>
                </footer>
            </div>
        }
    }
}

impl Model {
    /// Exactly one step region is mounted at a time.
    fn render_active_step(&self, ctx: &Context<Self>) -> Html {
        match self.session.step {
            WizardStep::SelectImage => upload_step::render_upload_step(self, ctx),
            WizardStep::EnterSymptoms => symptoms_step::render_symptoms_step(self, ctx),
            WizardStep::ViewResult => result_step::render_result_step(self, ctx),
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
