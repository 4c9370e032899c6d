//! Staging area for whatever the user has typed so far.
//!
//! Nothing here validates. The form only mirrors the inputs and hands out an
//! immutable [`FormSnapshot`] when the user asks to create the event.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Tag, COUNTRY_PLACEHOLDER};
use crate::utils;

/// Scalar inputs on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    EventName,
    EventDescription,
    StartDate,
    EndDate,
    EventImage,
    Country,
    City,
    AvailableTickets,
}

/// One user interaction, as delivered by the window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormInput {
    Edit { field: FormField, value: String },
    ToggleTag { tag: Tag },
    ImageChosen { path: String },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    event_name: String,
    event_description: String,
    start_date: String,
    end_date: String,
    event_image: String,
    country: String,
    city: String,
    available_tickets: String,
    tags: BTreeSet<Tag>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            event_name: String::new(),
            event_description: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            event_image: String::new(),
            country: COUNTRY_PLACEHOLDER.to_string(),
            city: String::new(),
            available_tickets: String::new(),
            tags: BTreeSet::new(),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::EventName => &self.event_name,
            FormField::EventDescription => &self.event_description,
            FormField::StartDate => &self.start_date,
            FormField::EndDate => &self.end_date,
            FormField::EventImage => &self.event_image,
            FormField::Country => &self.country,
            FormField::City => &self.city,
            FormField::AvailableTickets => &self.available_tickets,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::EventName => &mut self.event_name,
            FormField::EventDescription => &mut self.event_description,
            FormField::StartDate => &mut self.start_date,
            FormField::EndDate => &mut self.end_date,
            FormField::EventImage => &mut self.event_image,
            FormField::Country => &mut self.country,
            FormField::City => &mut self.city,
            FormField::AvailableTickets => &mut self.available_tickets,
        };
        *slot = value.into();
    }

    /// Flips `tag` and returns whether it is now selected.
    pub fn toggle_tag(&mut self, tag: Tag) -> bool {
        if self.tags.remove(&tag) {
            false
        } else {
            self.tags.insert(tag);
            true
        }
    }

    pub fn set_tag(&mut self, tag: Tag, selected: bool) {
        if selected {
            self.tags.insert(tag);
        } else {
            self.tags.remove(&tag);
        }
    }

    pub fn is_tagged(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Selected tags in vocabulary order.
    pub fn selected_tags(&self) -> Vec<Tag> {
        self.tags.iter().copied().collect()
    }

    pub fn apply(&mut self, input: FormInput) {
        match input {
            FormInput::Edit { field, value } => self.set(field, value),
            FormInput::ToggleTag { tag } => {
                self.toggle_tag(tag);
            }
            FormInput::ImageChosen { path } => self.set(FormField::EventImage, path),
            FormInput::Reset => self.reset(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            event_name: self.event_name.clone(),
            event_description: self.event_description.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            event_image: self.event_image.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            available_tickets: self.available_tickets.clone(),
            tags: self.selected_tags(),
        }
    }

    pub fn view(&self, description_limit: usize) -> FormView {
        FormView {
            event_name: self.event_name.clone(),
            event_description: self.event_description.clone(),
            description_counter: DescriptionCounter::measure(
                &self.event_description,
                description_limit,
            ),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            event_image: self.event_image.clone(),
            image_label: image_label(&self.event_image),
            country: self.country.clone(),
            city: self.city.clone(),
            available_tickets: self.available_tickets.clone(),
            tags: self.selected_tags(),
        }
    }
}

/// Frozen copy of the form taken when the user presses create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub event_name: String,
    pub event_description: String,
    pub start_date: String,
    pub end_date: String,
    pub event_image: String,
    pub country: String,
    pub city: String,
    pub available_tickets: String,
    pub tags: Vec<Tag>,
}

/// Everything the window needs to redraw the form.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub event_name: String,
    pub event_description: String,
    pub description_counter: DescriptionCounter,
    pub start_date: String,
    pub end_date: String,
    pub event_image: String,
    pub image_label: String,
    pub country: String,
    pub city: String,
    pub available_tickets: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionCounter {
    pub chars: usize,
    pub limit: usize,
    pub over_limit: bool,
    pub label: String,
}

impl DescriptionCounter {
    /// The limit is advisory; long descriptions are still saved.
    pub fn measure(text: &str, limit: usize) -> Self {
        let chars = text.trim().chars().count();
        Self {
            chars,
            limit,
            over_limit: chars > limit,
            label: format!("{chars}/{limit} characters"),
        }
    }
}

pub fn image_label(path: &str) -> String {
    if path.is_empty() {
        "Choose File    No file chosen".to_string()
    } else {
        format!("Choose File    {}", utils::file_name(path))
    }
}
