use gloo_file::File;
use shared::{Duration, SymptomFlags};

/// The wizard shows exactly one of these regions at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    SelectImage,
    EnterSymptoms,
    ViewResult,
}

/// The image picked in step one. The preview is filled in once the
/// data-URI read completes.
pub struct SelectedImage {
    pub file: File,
    pub preview: Option<String>,
}

/// Patient-supplied intake fields, all owned here and pushed into the DOM
/// as controlled inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymptomForm {
    pub age: String,
    pub duration: Duration,
    pub symptoms: SymptomFlags,
    pub notes: String,
}

/// In-memory state of one wizard pass. The view renders from this struct;
/// the DOM is never the source of truth.
pub struct UploadSession {
    pub step: WizardStep,
    pub image: Option<SelectedImage>,
    pub form: SymptomForm,
}

impl UploadSession {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectImage,
            image: None,
            form: SymptomForm::default(),
        }
    }

    /// The continue control only renders once a file is selected, so no
    /// further validation happens here.
    pub fn advance_to_symptoms(&mut self) {
        if self.step == WizardStep::SelectImage {
            self.step = WizardStep::EnterSymptoms;
        }
    }

    /// Goes back to the upload step, keeping the selection and the form.
    pub fn return_to_upload(&mut self) {
        if self.step == WizardStep::EnterSymptoms {
            self.step = WizardStep::SelectImage;
        }
    }

    pub fn show_result(&mut self) {
        if self.step == WizardStep::EnterSymptoms {
            self.step = WizardStep::ViewResult;
        }
    }

    /// Back to a pristine session, valid from any step.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Symptom;

    #[test]
    fn starts_pristine_on_the_upload_step() {
        let session = UploadSession::new();
        assert_eq!(session.step, WizardStep::SelectImage);
        assert!(session.image.is_none());
        assert_eq!(session.form, SymptomForm::default());
    }

    #[test]
    fn steps_follow_the_wizard_edges_only() {
        let mut session = UploadSession::new();

        // ViewResult is unreachable from the upload step.
        session.show_result();
        assert_eq!(session.step, WizardStep::SelectImage);

        session.advance_to_symptoms();
        assert_eq!(session.step, WizardStep::EnterSymptoms);

        // Advancing again is a no-op.
        session.advance_to_symptoms();
        assert_eq!(session.step, WizardStep::EnterSymptoms);

        session.show_result();
        assert_eq!(session.step, WizardStep::ViewResult);

        // Going back is only defined from the symptoms step.
        session.return_to_upload();
        assert_eq!(session.step, WizardStep::ViewResult);
    }

    #[test]
    fn form_fields_survive_back_and_forth() {
        let mut session = UploadSession::new();
        session.form.age = "34".to_string();
        session.form.symptoms.set(Symptom::Itching, true);
        session.form.notes = "spreading since last week".to_string();

        session.advance_to_symptoms();
        session.return_to_upload();
        session.advance_to_symptoms();

        assert_eq!(session.form.age, "34");
        assert!(session.form.symptoms.itching);
        assert_eq!(session.form.notes, "spreading since last week");
    }

    #[test]
    fn reset_clears_everything_from_any_step() {
        let mut session = UploadSession::new();
        session.form.age = "52".to_string();
        session.form.duration = Duration::MoreThanSixMonths;
        session.form.symptoms.set(Symptom::Pain, true);
        session.form.notes = "notes".to_string();
        session.advance_to_symptoms();
        session.show_result();

        session.reset();
        assert_eq!(session.step, WizardStep::SelectImage);
        assert!(session.image.is_none());
        assert_eq!(session.form, SymptomForm::default());
    }

    #[test]
    fn only_image_mime_types_are_accepted() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/jpeg"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime("text/html"));
        assert!(!is_image_mime(""));
    }
}
