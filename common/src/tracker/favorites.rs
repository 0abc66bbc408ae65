use std::collections::BTreeSet;

/// Favorite recipe ids. Absent means not a favorite.
#[derive(Clone, Debug, Default)]
pub struct FavoritesStore {
    ids: BTreeSet<String>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the id is a favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            return false;
        }
        self.ids.insert(id.to_string());
        true
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct TriedStore {
    ids: BTreeSet<String>,
}

impl TriedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tried(&mut self, id: &str, tried: bool) {
        if tried {
            self.ids.insert(id.to_string());
        } else {
            self.ids.remove(id);
        }
    }

    pub fn is_tried(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
