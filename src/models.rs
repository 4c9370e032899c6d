use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const COUNTRY_PLACEHOLDER: &str = "Select a country";

pub const COUNTRIES: [&str; 10] = [
    COUNTRY_PLACEHOLDER,
    "United States",
    "Canada",
    "United Kingdom",
    "Germany",
    "France",
    "Japan",
    "Australia",
    "Egypt",
    "Other",
];

/// One submitted event listing, exactly as it is written to the store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub id: Uuid,
    pub event_name: String,
    pub event_description: String,
    pub start_date: String,
    pub end_date: String,
    pub event_image: String, // path as picked, never opened
    pub country: String,
    pub city: String,
    pub available_tickets: String,
    pub tags: Vec<Tag>,
    /// ISO-8601. Written as UTC RFC 3339; older stores may hold naive local times.
    pub created_at: String,
}

/// The closed tag vocabulary. Variant order is the order tags are shown and
/// the order they are written into a record.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    Art,
    Business,
    Charity,
    Community,
    Concert,
    Conference,
    Craft,
    Culinary,
    Cultural,
    Dance,
    #[serde(rename = "DIY")]
    Diy,
    Education,
    Entertainment,
    Exhibition,
    Fashion,
    Festival,
    Film,
    Fitness,
    Food,
    Gaming,
    Health,
    Literature,
    Music,
    Networking,
    Outdoor,
    Party,
    Photography,
    Poetry,
    Religious,
    Science,
    Seminar,
    Sports,
    Technology,
    Theater,
    Travel,
    Workshops,
}

impl Tag {
    pub const ALL: [Tag; 36] = [
        Tag::Art,
        Tag::Business,
        Tag::Charity,
        Tag::Community,
        Tag::Concert,
        Tag::Conference,
        Tag::Craft,
        Tag::Culinary,
        Tag::Cultural,
        Tag::Dance,
        Tag::Diy,
        Tag::Education,
        Tag::Entertainment,
        Tag::Exhibition,
        Tag::Fashion,
        Tag::Festival,
        Tag::Film,
        Tag::Fitness,
        Tag::Food,
        Tag::Gaming,
        Tag::Health,
        Tag::Literature,
        Tag::Music,
        Tag::Networking,
        Tag::Outdoor,
        Tag::Party,
        Tag::Photography,
        Tag::Poetry,
        Tag::Religious,
        Tag::Science,
        Tag::Seminar,
        Tag::Sports,
        Tag::Technology,
        Tag::Theater,
        Tag::Travel,
        Tag::Workshops,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tag::Art => "Art",
            Tag::Business => "Business",
            Tag::Charity => "Charity",
            Tag::Community => "Community",
            Tag::Concert => "Concert",
            Tag::Conference => "Conference",
            Tag::Craft => "Craft",
            Tag::Culinary => "Culinary",
            Tag::Cultural => "Cultural",
            Tag::Dance => "Dance",
            Tag::Diy => "DIY",
            Tag::Education => "Education",
            Tag::Entertainment => "Entertainment",
            Tag::Exhibition => "Exhibition",
            Tag::Fashion => "Fashion",
            Tag::Festival => "Festival",
            Tag::Film => "Film",
            Tag::Fitness => "Fitness",
            Tag::Food => "Food",
            Tag::Gaming => "Gaming",
            Tag::Health => "Health",
            Tag::Literature => "Literature",
            Tag::Music => "Music",
            Tag::Networking => "Networking",
            Tag::Outdoor => "Outdoor",
            Tag::Party => "Party",
            Tag::Photography => "Photography",
            Tag::Poetry => "Poetry",
            Tag::Religious => "Religious",
            Tag::Science => "Science",
            Tag::Seminar => "Seminar",
            Tag::Sports => "Sports",
            Tag::Technology => "Technology",
            Tag::Theater => "Theater",
            Tag::Travel => "Travel",
            Tag::Workshops => "Workshops",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_declared_in_order() {
        let mut sorted = Tag::ALL;
        sorted.sort();
        assert_eq!(sorted, Tag::ALL);
        assert_eq!(Tag::ALL.first(), Some(&Tag::Art));
        assert_eq!(Tag::ALL.last(), Some(&Tag::Workshops));
    }

    #[test]
    fn tags_serialize_as_their_labels() {
        for tag in Tag::ALL {
            let encoded = serde_json::to_string(&tag).expect("encode tag");
            assert_eq!(encoded, format!("\"{}\"", tag.label()));
        }
        let diy: Tag = serde_json::from_str("\"DIY\"").expect("decode DIY");
        assert_eq!(diy, Tag::Diy);
    }

    #[test]
    fn record_fields_are_strings_except_tags() {
        let record = EventRecord {
            id: Uuid::new_v4(),
            event_name: "Jazz Night".to_string(),
            event_description: "Live jazz downtown".to_string(),
            start_date: String::new(),
            end_date: String::new(),
            event_image: String::new(),
            country: COUNTRY_PLACEHOLDER.to_string(),
            city: String::new(),
            available_tickets: "120".to_string(),
            tags: vec![Tag::Music, Tag::Festival],
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let value = serde_json::to_value(&record).expect("encode record");
        let object = value.as_object().expect("record is an object");
        assert_eq!(object.len(), 11);
        for (key, field) in object {
            if key == "tags" {
                assert!(field.is_array());
            } else {
                assert!(field.is_string(), "{key} should be a string");
            }
        }
    }
}
