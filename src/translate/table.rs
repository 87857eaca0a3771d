use std::collections::HashMap;

use crate::syntax::Catalog;

// first record for an id and first variant for a code win, as in the generated C
#[derive(Debug, Default)]
pub struct Table {
    entries: HashMap<String, HashMap<String, String>>,
}

impl Table {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut entries: HashMap<String, HashMap<String, String>> = HashMap::new();
        for record in &catalog.records {
            if entries.contains_key(&record.id.value) {
                continue;
            }
            let mut variants = HashMap::new();
            for variant in &record.variants {
                variants
                    .entry(variant.lang.clone())
                    .or_insert_with(|| variant.text.value.clone());
            }
            entries.insert(record.id.value.clone(), variants);
        }
        Self { entries }
    }

    pub fn translate<'a>(&'a self, message: &'a str, lang: &str) -> &'a str {
        match self.entries.get_key_value(message) {
            Some((id, variants)) => variants.get(lang).map_or(id.as_str(), String::as_str),
            None => message,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
