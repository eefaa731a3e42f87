use crate::domain::value_objects::TechnologyId;

/// One template contributing to a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub id: TechnologyId,
    pub text: String,
}

/// Ordered templates to merge. Insertion order is rank order.
///
/// Ids are unique: inserting an id that is already present replaces its
/// text but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    entries: Vec<TemplateEntry>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a template, or overwrite the text of an existing id in place.
    pub fn insert(&mut self, id: TechnologyId, text: impl Into<String>) {
        let text = text.into();
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => existing.text = text,
            None => self.entries.push(TemplateEntry { id, text }),
        }
    }

    /// Put the existing user file first, ahead of every template.
    pub fn prepend_custom(&mut self, text: impl Into<String>) {
        self.entries.retain(|e| !e.id.is_custom());
        self.entries.insert(
            0,
            TemplateEntry {
                id: TechnologyId::custom(),
                text: text.into(),
            },
        );
    }

    pub fn get(&self, id: &TechnologyId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.text.as_str())
    }

    pub fn contains(&self, id: &TechnologyId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TechnologyId> {
        self.entries.iter().map(|e| &e.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(TechnologyId, String)> for TemplateSet {
    fn from_iter<I: IntoIterator<Item = (TechnologyId, String)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (id, text) in iter {
            set.insert(id, text);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(s: &str) -> TechnologyId {
        TechnologyId::parse(s).unwrap()
    }

    #[test]
    fn insert_keeps_order() {
        let mut set = TemplateSet::new();
        set.insert(tid("python"), "a");
        set.insert(tid("node"), "b");
        let ids: Vec<_> = set.ids().map(TechnologyId::as_str).collect();
        assert_eq!(ids, vec!["python", "node"]);
    }

    #[test]
    fn reinsert_overwrites_in_place() {
        let mut set = TemplateSet::new();
        set.insert(tid("python"), "old");
        set.insert(tid("node"), "b");
        set.insert(tid("python"), "new");

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&tid("python")), Some("new"));
        assert_eq!(set.ids().next(), Some(&tid("python")));
    }

    #[test]
    fn custom_always_goes_first() {
        let mut set = TemplateSet::new();
        set.insert(tid("rust"), "target/");
        set.prepend_custom("secret.txt");
        set.prepend_custom("secret2.txt");

        assert_eq!(set.len(), 2);
        let first = set.iter().next().unwrap();
        assert!(first.id.is_custom());
        assert_eq!(first.text, "secret2.txt");
    }
}
