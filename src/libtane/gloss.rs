use crate::libtane::sql::{InsertStatement, SqlValue};
use log::debug;
use std::time::Instant;

pub const GLOSS_TABLE: &str = "public.glosses";
pub const GLOSS_HEADER: &str = "Auto-generated Alphanumeric Glosses Seed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlossKind {
    Number,
    Alphabet,
}

impl GlossKind {
    pub fn tags(&self) -> [&'static str; 2] {
        match self {
            GlossKind::Number => ["number", "digit"],
            GlossKind::Alphabet => ["alphabet", "letter"],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gloss {
    pub name: String,
    pub image_url: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GlossSettings {
    pub numbers: Vec<String>,
    pub alphabets: Vec<String>,
    pub image_dir: String,
    pub extension: String,
}

impl Default for GlossSettings {
    fn default() -> Self {
        Self {
            numbers: (1..=9).map(|num| num.to_string()).collect(),
            alphabets: ('A'..='Z').map(|char| char.to_string()).collect(),
            image_dir: String::from("/Glosses"),
            extension: String::from("jpg"),
        }
    }
}

impl GlossSettings {
    fn image_url(&self, name: &str) -> String {
        format!(
            "{}/{}.{}",
            self.image_dir.trim_end_matches('/'),
            name,
            self.extension
        )
    }

    fn gloss(&self, name: &str, kind: GlossKind) -> Gloss {
        Gloss {
            name: name.to_string(),
            image_url: self.image_url(name),
            tags: kind.tags().iter().map(|tag| tag.to_string()).collect(),
        }
    }
}

/// Numbers first, then letters, each in configured order.
pub fn generate_glosses(settings: &GlossSettings) -> Vec<Gloss> {
    let now = Instant::now();
    let mut glosses = Vec::with_capacity(settings.numbers.len() + settings.alphabets.len());
    glosses.extend(
        settings
            .numbers
            .iter()
            .map(|num| settings.gloss(num, GlossKind::Number)),
    );
    glosses.extend(
        settings
            .alphabets
            .iter()
            .map(|char| settings.gloss(char, GlossKind::Alphabet)),
    );

    debug!(
        "[Glosses] Generated {} glosses in {} µs.",
        glosses.len(),
        now.elapsed().as_micros()
    );
    glosses
}

pub fn glosses_statement(glosses: &[Gloss]) -> InsertStatement {
    let mut statement = InsertStatement::new(
        GLOSS_HEADER,
        GLOSS_TABLE,
        vec!["gloss_name", "image_url", "gloss_tags"],
    );
    for gloss in glosses {
        statement.push_row(vec![
            SqlValue::Text(gloss.name.clone()),
            SqlValue::Text(gloss.image_url.clone()),
            SqlValue::TextArray(gloss.tags.clone()),
        ]);
    }
    statement
}
