use crate::models::Flat;
use tracing::debug;

/// Change to apply to the local list after a server round trip
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// A fresh page was fetched; drop everything held so far
    Replace(Vec<Flat>),
    Added(Flat),
    /// The server returned an updated record; swap it in by id
    Updated(Flat),
    Removed(i64),
}

/// Ordered in-memory list of flats, in the order the server returned them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatStore {
    flats: Vec<Flat>,
}

impl FlatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::Replace(flats) => {
                debug!("Replacing {} flats with {}", self.flats.len(), flats.len());
                self.flats = flats;
            }
            StoreAction::Added(flat) => self.flats.push(flat),
            StoreAction::Updated(flat) => {
                match self.flats.iter_mut().find(|existing| existing.id == flat.id) {
                    Some(existing) => *existing = flat,
                    None => debug!("Updated flat {} is not loaded, ignoring", flat.id),
                }
            }
            StoreAction::Removed(id) => self.flats.retain(|flat| flat.id != id),
        }
    }

    pub fn flats(&self) -> &[Flat] {
        &self.flats
    }

    pub fn get(&self, id: i64) -> Option<&Flat> {
        self.flats.iter().find(|flat| flat.id == id)
    }

    pub fn len(&self) -> usize {
        self.flats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flats.is_empty()
    }
}
