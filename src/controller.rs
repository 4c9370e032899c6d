use serde::Serialize;

use crate::error::FormError;
use crate::form::{FormField, FormInput, FormSnapshot, FormState, FormView};
use crate::models::EventRecord;
use crate::persister::Persister;

const CANCEL_PROMPT: &str = "Are you sure you want to cancel? All unsaved data will be lost.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// The prompts the form needs from its host window.
pub trait Dialogs {
    /// Absolute path of the picked image, or `None` if the picker was dismissed.
    fn pick_image(&self) -> Option<String>;
    fn confirm(&self, title: &str, message: &str) -> bool;
    fn notify(&self, notice: Notice);
}

/// Saves `snapshot` and tells the user how it went. Leaves clearing the form
/// to the caller, so it can run without holding the form.
pub fn submit_and_report(
    persister: &Persister,
    snapshot: &FormSnapshot,
    dialogs: &dyn Dialogs,
) -> Result<EventRecord, FormError> {
    match persister.submit(snapshot) {
        Ok(record) => {
            dialogs.notify(Notice::info(
                "Success",
                format!("Event created successfully!\nEvent ID: {}", record.id),
            ));
            Ok(record)
        }
        Err(err) => {
            if let FormError::Store(store_err) = &err {
                log::error!("failed to save event: {store_err}");
            }
            dialogs.notify(Notice::error("Error", err.user_message()));
            Err(err)
        }
    }
}

pub fn confirm_discard(dialogs: &dyn Dialogs) -> bool {
    dialogs.confirm("Cancel", CANCEL_PROMPT)
}

pub struct FormController {
    form: FormState,
    persister: Persister,
    description_limit: usize,
}

impl FormController {
    pub fn new(persister: Persister, description_limit: usize) -> Self {
        Self {
            form: FormState::new(),
            persister,
            description_limit,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn persister(&self) -> &Persister {
        &self.persister
    }

    pub fn description_limit(&self) -> usize {
        self.description_limit
    }

    pub fn view(&self) -> FormView {
        self.form.view(self.description_limit)
    }

    pub fn input(&mut self, input: FormInput) -> FormView {
        self.form.apply(input);
        self.view()
    }

    pub fn choose_image(&mut self, dialogs: &dyn Dialogs) -> FormView {
        if let Some(path) = dialogs.pick_image() {
            self.form.set(FormField::EventImage, path);
        }
        self.view()
    }

    /// On success the form is cleared. On any error the user's input stays put.
    pub fn create_event(&mut self, dialogs: &dyn Dialogs) -> Result<EventRecord, FormError> {
        let record = submit_and_report(&self.persister, &self.form.snapshot(), dialogs)?;
        self.form.reset();
        Ok(record)
    }

    /// Clears the form if the user confirms. Returns whether it was cleared.
    pub fn cancel_event(&mut self, dialogs: &dyn Dialogs) -> bool {
        let confirmed = confirm_discard(dialogs);
        if confirmed {
            self.form.reset();
        }
        confirmed
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, fs};

    use super::*;
    use crate::config::CorruptStorePolicy;
    use crate::error::RequiredField;
    use crate::models::Tag;
    use crate::store::EventStore;

    #[derive(Default)]
    struct Recorder {
        pick: Option<String>,
        answer: bool,
        notices: RefCell<Vec<Notice>>,
        prompts: RefCell<Vec<(String, String)>>,
    }

    impl Dialogs for Recorder {
        fn pick_image(&self) -> Option<String> {
            self.pick.clone()
        }

        fn confirm(&self, title: &str, message: &str) -> bool {
            self.prompts
                .borrow_mut()
                .push((title.to_string(), message.to_string()));
            self.answer
        }

        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }
    }

    fn controller_at(path: std::path::PathBuf) -> FormController {
        FormController::new(
            Persister::new(EventStore::open(path, CorruptStorePolicy::Backup)),
            500,
        )
    }

    fn fill(controller: &mut FormController) {
        controller.input(FormInput::Edit {
            field: FormField::EventName,
            value: "Jazz Night".to_string(),
        });
        controller.input(FormInput::Edit {
            field: FormField::EventDescription,
            value: "Live jazz downtown".to_string(),
        });
        controller.input(FormInput::ToggleTag { tag: Tag::Music });
    }

    #[test]
    fn successful_create_notifies_and_resets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller_at(dir.path().join("events.json"));
        let dialogs = Recorder {
            pick: Some("/pics/jazz.gif".to_string()),
            ..Default::default()
        };
        fill(&mut controller);
        controller.choose_image(&dialogs);

        let record = controller.create_event(&dialogs).expect("create");
        assert_eq!(record.event_image, "/pics/jazz.gif");
        assert!(controller.form().is_default());

        let notices = dialogs.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert_eq!(notices[0].title, "Success");
        assert!(notices[0].message.ends_with(&record.id.to_string()));
    }

    #[test]
    fn missing_name_reports_and_keeps_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller_at(dir.path().join("events.json"));
        let dialogs = Recorder::default();
        controller.input(FormInput::Edit {
            field: FormField::EventDescription,
            value: "No name yet".to_string(),
        });

        let err = controller.create_event(&dialogs).expect_err("missing name");
        assert!(matches!(
            err,
            FormError::MissingField(RequiredField::EventName)
        ));
        assert_eq!(
            controller.form().get(FormField::EventDescription),
            "No name yet"
        );
        let notices = dialogs.notices.borrow();
        assert_eq!(notices[0], Notice::error("Error", "Please enter an event name"));
    }

    #[test]
    fn io_failure_keeps_input_for_retry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocked = dir.path().join("events.json");
        fs::create_dir(&blocked).expect("block store path");
        let mut controller = controller_at(blocked);
        let dialogs = Recorder::default();
        fill(&mut controller);

        let err = controller.create_event(&dialogs).expect_err("io error");
        assert!(matches!(err, FormError::Store(_)));
        assert_eq!(controller.form().get(FormField::EventName), "Jazz Night");
        assert!(controller.form().is_tagged(Tag::Music));

        let notices = dialogs.notices.borrow();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.starts_with("Failed to save event: "));
    }

    #[test]
    fn dismissed_picker_keeps_previous_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller_at(dir.path().join("events.json"));
        controller.input(FormInput::ImageChosen {
            path: "/pics/old.png".to_string(),
        });

        let view = controller.choose_image(&Recorder::default());
        assert_eq!(view.event_image, "/pics/old.png");
        assert_eq!(view.image_label, "Choose File    old.png");
    }

    #[test]
    fn cancel_respects_confirmation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller_at(dir.path().join("events.json"));
        fill(&mut controller);

        let declined = Recorder::default();
        assert!(!controller.cancel_event(&declined));
        assert_eq!(controller.form().get(FormField::EventName), "Jazz Night");
        assert_eq!(
            declined.prompts.borrow()[0],
            ("Cancel".to_string(), CANCEL_PROMPT.to_string())
        );

        let accepted = Recorder {
            answer: true,
            ..Default::default()
        };
        assert!(controller.cancel_event(&accepted));
        assert!(controller.form().is_default());
        assert!(!dir.path().join("events.json").exists());
    }

    #[test]
    fn submit_and_report_leaves_form_to_caller() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller_at(dir.path().join("events.json"));
        fill(&mut controller);
        let snapshot = controller.form().snapshot();
        let persister = controller.persister().clone();

        // edits made while the save is in flight are not part of the record
        controller.input(FormInput::Edit {
            field: FormField::City,
            value: "Memphis".to_string(),
        });
        let dialogs = Recorder::default();
        let record = submit_and_report(&persister, &snapshot, &dialogs).expect("submit");

        assert_eq!(record.city, "");
        assert_eq!(controller.form().get(FormField::City), "Memphis");
        assert_eq!(dialogs.notices.borrow()[0].level, NoticeLevel::Info);
        assert_eq!(controller.description_limit(), 500);
        assert_eq!(persister.store().load().expect("load").len(), 1);
    }
}
