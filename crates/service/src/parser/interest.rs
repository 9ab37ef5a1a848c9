use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Business,
    Creative,
    Academic,
    Personal,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Technology,
        Category::Business,
        Category::Creative,
        Category::Academic,
        Category::Personal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Creative => "creative",
            Category::Academic => "academic",
            Category::Personal => "personal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown interest category: {s}"))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interest {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: Category,
}

const fn interest(id: &'static str, name: &'static str, icon: &'static str, category: Category) -> Interest {
    Interest { id, name, icon, category }
}

pub static INTERESTS: [Interest; 24] = [
    interest("1", "Web Development", "💻", Category::Technology),
    interest("2", "Mobile Development", "📱", Category::Technology),
    interest("3", "Data Science", "📊", Category::Technology),
    interest("4", "Machine Learning", "🤖", Category::Technology),
    interest("5", "DevOps", "🔄", Category::Technology),
    interest("6", "UI/UX Design", "🎨", Category::Creative),
    interest("7", "Product Management", "📋", Category::Business),
    interest("8", "Entrepreneurship", "🚀", Category::Business),
    interest("9", "Digital Marketing", "📢", Category::Business),
    interest("10", "Finance", "💰", Category::Business),
    interest("11", "Career Development", "📈", Category::Personal),
    interest("12", "Leadership", "👑", Category::Personal),
    interest("13", "Communication Skills", "🗣️", Category::Personal),
    interest("14", "Public Speaking", "🎤", Category::Personal),
    interest("15", "Academic Research", "🔍", Category::Academic),
    interest("16", "Mathematics", "🧮", Category::Academic),
    interest("17", "Physics", "⚛️", Category::Academic),
    interest("18", "Literature", "📚", Category::Academic),
    interest("19", "Psychology", "🧠", Category::Academic),
    interest("20", "Foreign Languages", "🌎", Category::Academic),
    interest("21", "Photography", "📷", Category::Creative),
    interest("22", "Video Production", "🎥", Category::Creative),
    interest("23", "Music", "🎵", Category::Creative),
    interest("24", "Writing", "✍️", Category::Creative),
];

/// Catalogue entries, optionally restricted to one category, in catalogue order.
pub fn interests_in(category: Option<Category>) -> Vec<&'static Interest> {
    INTERESTS
        .iter()
        .filter(|interest| category.map_or(true, |c| interest.category == c))
        .collect()
}
