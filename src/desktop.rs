use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tauri::{AppHandle, Runtime, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::controller::{
    confirm_discard, submit_and_report, Dialogs, FormController, Notice, NoticeLevel,
};
use crate::form::{FormField, FormInput, FormView};
use crate::models::{Tag, COUNTRIES};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// The form behind a lock. Commands hold it only to read or apply state, never
/// while a dialog or file write is pending.
pub struct FormSession {
    controller: Mutex<FormController>,
}

impl FormSession {
    pub fn new(controller: FormController) -> Self {
        Self {
            controller: Mutex::new(controller),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, FormController>, String> {
        self.controller
            .lock()
            .map_err(|_| "form state mutex poisoned".to_string())
    }
}

/// Native dialogs from the dialog plugin. Every call blocks until the user
/// answers, so only use it inside `spawn_blocking`.
pub struct NativeDialogs<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> NativeDialogs<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> Dialogs for NativeDialogs<R> {
    fn pick_image(&self) -> Option<String> {
        self.app
            .dialog()
            .file()
            .set_title("Choose Event Image")
            .add_filter("Image files", &IMAGE_EXTENSIONS)
            .blocking_pick_file()
            .and_then(|picked| picked.into_path().ok())
            .map(|path| path.to_string_lossy().into_owned())
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        self.app
            .dialog()
            .message(message)
            .title(title)
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancel)
            .blocking_show()
    }

    fn notify(&self, notice: Notice) {
        let kind = match notice.level {
            NoticeLevel::Info => MessageDialogKind::Info,
            NoticeLevel::Error => MessageDialogKind::Error,
        };
        self.app
            .dialog()
            .message(notice.message)
            .title(notice.title)
            .kind(kind)
            .blocking_show();
    }
}

#[derive(Debug, Serialize)]
pub struct FormOptions {
    tags: Vec<Tag>,
    countries: Vec<&'static str>,
    description_limit: usize,
}

#[tauri::command]
pub async fn form_options(session: State<'_, FormSession>) -> Result<FormOptions, String> {
    Ok(FormOptions {
        tags: Tag::ALL.to_vec(),
        countries: COUNTRIES.to_vec(),
        description_limit: session.lock()?.description_limit(),
    })
}

#[tauri::command]
pub async fn form_view(session: State<'_, FormSession>) -> Result<FormView, String> {
    Ok(session.lock()?.view())
}

#[tauri::command]
pub async fn set_field(
    field: FormField,
    value: String,
    session: State<'_, FormSession>,
) -> Result<FormView, String> {
    Ok(session.lock()?.input(FormInput::Edit { field, value }))
}

#[tauri::command]
pub async fn toggle_tag(tag: Tag, session: State<'_, FormSession>) -> Result<FormView, String> {
    Ok(session.lock()?.input(FormInput::ToggleTag { tag }))
}

#[tauri::command]
pub async fn choose_image(
    app: AppHandle,
    session: State<'_, FormSession>,
) -> Result<FormView, String> {
    let picked = tauri::async_runtime::spawn_blocking(move || NativeDialogs::new(app).pick_image())
        .await
        .map_err(|e| e.to_string())?;

    let mut controller = session.lock()?;
    Ok(match picked {
        Some(path) => controller.input(FormInput::ImageChosen { path }),
        None => controller.view(),
    })
}

#[tauri::command]
pub async fn create_event(
    app: AppHandle,
    session: State<'_, FormSession>,
) -> Result<FormView, String> {
    let (snapshot, persister) = {
        let controller = session.lock()?;
        (controller.form().snapshot(), controller.persister().clone())
    };

    tauri::async_runtime::spawn_blocking(move || {
        submit_and_report(&persister, &snapshot, &NativeDialogs::new(app))
    })
    .await
    .map_err(|e| e.to_string())?
    .map_err(|err| err.user_message())?;

    Ok(session.lock()?.input(FormInput::Reset))
}

#[tauri::command]
pub async fn cancel_event(
    app: AppHandle,
    session: State<'_, FormSession>,
) -> Result<FormView, String> {
    let confirmed =
        tauri::async_runtime::spawn_blocking(move || confirm_discard(&NativeDialogs::new(app)))
            .await
            .map_err(|e| e.to_string())?;

    let mut controller = session.lock()?;
    Ok(if confirmed {
        controller.input(FormInput::Reset)
    } else {
        controller.view()
    })
}
