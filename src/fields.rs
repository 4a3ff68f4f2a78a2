//! Field catalog for field-based generation
//!
//! A static taxonomy of named fields, each carrying a short ordered list of
//! example values. The example lists are the entire enumerable domain for a
//! field; there is no larger corpus behind them.

/// A single catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEntry {
    pub id: &'static str,
    pub category: &'static str,
    pub group: &'static str,
    pub kind: &'static str,
    pub examples: &'static [&'static str],
}

/// The full field catalog, in declaration order
pub const FIELDS: &[FieldEntry] = &[
    // Personal
    FieldEntry {
        id: "first_name_male_0",
        category: "personal",
        group: "names",
        kind: "string",
        examples: &["John", "Michael", "David", "James", "Robert"],
    },
    FieldEntry {
        id: "first_name_female_0",
        category: "personal",
        group: "names",
        kind: "string",
        examples: &["Mary", "Sarah", "Jennifer", "Emily", "Jessica"],
    },
    FieldEntry {
        id: "last_name_0",
        category: "personal",
        group: "names",
        kind: "string",
        examples: &["Smith", "Johnson", "Williams", "Brown", "Jones"],
    },
    FieldEntry {
        id: "birth_year",
        category: "personal",
        group: "dates",
        kind: "number",
        examples: &["1990", "1985", "1995", "2000", "1980"],
    },
    FieldEntry {
        id: "birth_month_name",
        category: "personal",
        group: "dates",
        kind: "string",
        examples: &["January", "February", "March", "April", "May"],
    },
    // Company and work
    FieldEntry {
        id: "company_name",
        category: "professional",
        group: "company",
        kind: "string",
        examples: &["Google", "Microsoft", "Apple", "Amazon", "Facebook"],
    },
    FieldEntry {
        id: "job_title",
        category: "professional",
        group: "company",
        kind: "string",
        examples: &["Engineer", "Manager", "Developer", "Designer", "Analyst"],
    },
    // Technical
    FieldEntry {
        id: "dev_handles",
        category: "technical",
        group: "programming",
        kind: "string",
        examples: &["admin", "root", "user", "test", "dev"],
    },
    FieldEntry {
        id: "programming_language",
        category: "technical",
        group: "programming",
        kind: "string",
        examples: &["python", "java", "javascript", "cpp", "rust"],
    },
    FieldEntry {
        id: "database_name",
        category: "technical",
        group: "database",
        kind: "string",
        examples: &["users", "products", "orders", "customers", "accounts"],
    },
    // Common affixes
    FieldEntry {
        id: "common_suffix_0",
        category: "patterns",
        group: "suffixes",
        kind: "string",
        examples: &["123", "2024", "!", "2023", "!!", "@123"],
    },
    FieldEntry {
        id: "common_prefix_0",
        category: "patterns",
        group: "prefixes",
        kind: "string",
        examples: &["admin", "test", "demo", "user", "my"],
    },
    // Meme and humor
    FieldEntry {
        id: "fav_meme_format",
        category: "humor",
        group: "memes",
        kind: "string",
        examples: &["doge", "pepe", "stonks", "distracted", "drake"],
    },
    FieldEntry {
        id: "favorite_joke",
        category: "humor",
        group: "jokes",
        kind: "string",
        examples: &["dad", "knock", "pun", "dark", "oneliners"],
    },
    FieldEntry {
        id: "favorite_pun",
        category: "humor",
        group: "puns",
        kind: "string",
        examples: &["punny", "wordplay", "dadjoke", "groaner", "clever"],
    },
    FieldEntry {
        id: "go_to_reaction_emoji",
        category: "humor",
        group: "emojis",
        kind: "string",
        examples: &["😂", "😊", "🔥", "❤️", "👍"],
    },
    // Music and entertainment
    FieldEntry {
        id: "favorite_artist",
        category: "entertainment",
        group: "music",
        kind: "string",
        examples: &["Beatles", "Drake", "Taylor", "Eminem", "Adele"],
    },
    FieldEntry {
        id: "favorite_song",
        category: "entertainment",
        group: "music",
        kind: "string",
        examples: &["Yesterday", "Imagine", "Bohemian", "Stairway", "Thriller"],
    },
    // Locations
    FieldEntry {
        id: "city_name",
        category: "location",
        group: "geography",
        kind: "string",
        examples: &["NewYork", "London", "Tokyo", "Paris", "Berlin"],
    },
    FieldEntry {
        id: "country_name",
        category: "location",
        group: "geography",
        kind: "string",
        examples: &["USA", "UK", "Japan", "France", "Germany"],
    },
    // Animals and pets
    FieldEntry {
        id: "pet_name",
        category: "personal",
        group: "pets",
        kind: "string",
        examples: &["Max", "Bella", "Charlie", "Lucy", "Cooper"],
    },
    FieldEntry {
        id: "animal_type",
        category: "personal",
        group: "pets",
        kind: "string",
        examples: &["dog", "cat", "bird", "fish", "hamster"],
    },
];

/// Exact lookup by field id
pub fn get_field(field_id: &str) -> Option<&'static FieldEntry> {
    FIELDS.iter().find(|f| f.id == field_id)
}

/// Resolve a field id to its enumerable example values.
///
/// Unknown ids fall back to the id itself as a single-element list; field
/// mode must keep generating rather than fail on a typo'd or ad-hoc field.
pub fn resolve_examples(field_id: &str) -> Vec<String> {
    match get_field(field_id) {
        Some(field) => field.examples.iter().map(|s| s.to_string()).collect(),
        None => {
            log::debug!("unknown field id '{}', using it as a literal value", field_id);
            vec![field_id.to_string()]
        }
    }
}

/// All field ids, in catalog order
pub fn list_fields() -> Vec<&'static str> {
    FIELDS.iter().map(|f| f.id).collect()
}

/// Distinct categories, sorted
pub fn list_categories() -> Vec<&'static str> {
    let mut categories: Vec<_> = FIELDS.iter().map(|f| f.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

/// All fields in a category, in catalog order
pub fn fields_by_category(category: &str) -> Vec<&'static FieldEntry> {
    FIELDS.iter().filter(|f| f.category == category).collect()
}

/// Case-insensitive substring search across id, category, and group
pub fn search_fields(query: &str) -> Vec<&'static FieldEntry> {
    let query = query.to_lowercase();
    FIELDS
        .iter()
        .filter(|f| {
            f.id.to_lowercase().contains(&query)
                || f.category.to_lowercase().contains(&query)
                || f.group.to_lowercase().contains(&query)
        })
        .collect()
}
