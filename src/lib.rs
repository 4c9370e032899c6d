pub mod config;
pub mod controller;
#[cfg(feature = "desktop")]
mod desktop;
pub mod error;
pub mod form;
pub mod models;
pub mod persister;
pub mod store;
mod utils;

pub use controller::{Dialogs, FormController, Notice, NoticeLevel};
pub use error::{FormError, RequiredField, StoreError};
pub use form::{FormField, FormInput, FormSnapshot, FormState, FormView};
pub use models::{EventRecord, Tag};
pub use persister::{collect, validate, Persister};
pub use store::EventStore;

#[cfg(feature = "desktop")]
use anyhow::Context;

#[cfg(feature = "desktop")]
fn check_store(store: &EventStore) -> anyhow::Result<usize> {
    store
        .count()
        .with_context(|| format!("reading event store {:?}", store.path()))
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::AppConfig::load();
    let store = EventStore::from_config(&config);
    match check_store(&store) {
        Ok(count) => log::info!("event store {:?} holds {count} events", store.path()),
        Err(err) => log::warn!("{err:#}; it will be handled on the next save"),
    }

    let controller = FormController::new(Persister::new(store), config.description_limit);

    tauri::Builder::default()
        .manage(desktop::FormSession::new(controller))
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            desktop::form_options,
            desktop::form_view,
            desktop::set_field,
            desktop::toggle_tag,
            desktop::choose_image,
            desktop::create_event,
            desktop::cancel_event
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
