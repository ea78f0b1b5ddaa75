use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// One row of the remote `vocab` table. The wire column names (`cat`,
/// `sound`) stay on the serde layer; the rest of the app uses the long
/// names. Rows are immutable once created and are owned by the backend;
/// everything the client holds is a disposable copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub id: i64,
    pub word: String,
    pub meaning: String,
    #[serde(rename = "cat")]
    pub category: String,
    #[serde(rename = "sound")]
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `vocab`. The id is server-assigned; `created_at` is
/// stamped client-side at submit time.
#[derive(Debug, Clone, Serialize)]
pub struct NewEntry {
    pub word: String,
    pub meaning: String,
    #[serde(rename = "cat")]
    pub category: String,
    #[serde(rename = "sound")]
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A row of the optional `profiles` table.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Categories are not stored anywhere: the list is always re-derived as the
/// distinct `cat` values currently in the table, sorted ascending.
pub fn derive_categories<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut categories: Vec<String> = values.into_iter().collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Optimistically add a just-introduced category label to the known set,
/// keeping it sorted. Returns true when the label was new. The set is a
/// local projection; the next full fetch reconciles it with the table.
pub fn add_known_category(categories: &mut Vec<String>, name: &str) -> bool {
    if categories.iter().any(|category| category == name) {
        return false;
    }

    categories.push(name.to_string());
    categories.sort();
    true
}

/// Static stand-ins shown when the `profiles` table is missing. The users
/// view degrades to these instead of failing.
pub fn placeholder_profiles() -> Vec<Profile> {
    (1..=3)
        .map(|n| Profile {
            id: n.to_string(),
            email: format!("user{}@example.com", n),
            name: Some(format!("Sample user {}", n)),
            created_at: Some(Utc::now()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_categories_sorted_distinct() {
        let cats = vec![
            "Greetings".to_string(),
            "Animals".to_string(),
            "Greetings".to_string(),
            "Food".to_string(),
            "Animals".to_string(),
        ];
        assert_eq!(derive_categories(cats), vec!["Animals", "Food", "Greetings"]);
    }

    #[test]
    fn test_derive_categories_empty_table() {
        assert_eq!(derive_categories(Vec::new()), Vec::<String>::new());
    }

    #[test]
    fn test_derive_categories_idempotent() {
        let cats = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        let first = derive_categories(cats);
        let second = derive_categories(first.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn test_new_category_is_selectable_immediately() {
        let mut known = vec!["Food".to_string(), "Greetings".to_string()];

        assert!(add_known_category(&mut known, "Animals"));
        assert_eq!(known, vec!["Animals", "Food", "Greetings"]);

        // Adding it again is a no-op.
        assert!(!add_known_category(&mut known, "Animals"));
        assert_eq!(known.len(), 3);
    }

    #[test]
    fn test_entry_uses_wire_column_names() {
        let json = r#"{
            "id": 7,
            "word": "hola",
            "meaning": "hello",
            "cat": "Greetings",
            "sound": null,
            "created_at": "2024-05-01T12:00:00+00:00"
        }"#;
        let entry: VocabEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.word, "hola");
        assert_eq!(entry.category, "Greetings");
        assert!(entry.audio_url.is_none());

        let back = serde_json::to_value(&entry).unwrap();
        assert!(back.get("cat").is_some());
        assert!(back.get("sound").is_some());
        assert!(back.get("category").is_none());
    }
}
