use serde::{Deserialize, Serialize};

use crate::model::{
    common::Id,
    db::{Admin, Candidate, Election, Voter},
};

/// A record type held in one of the store's top-level collections.
pub trait Document: Clone {
    /// The name of the collection.
    const NAME: &'static str;

    fn id(&self) -> Id;
    fn collection(data: &StoreData) -> &Vec<Self>;
    fn collection_mut(data: &mut StoreData) -> &mut Vec<Self>;
}

/// The entire dataset: one JSON document with a collection per record
/// type. There is no separate users collection; the unified login view is
/// derived from voters, candidates and admins on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    pub voters: Vec<Voter>,
    pub candidates: Vec<Candidate>,
    pub admins: Vec<Admin>,
    pub elections: Vec<Election>,
}

impl StoreData {
    /// Find a record by ID.
    pub fn get<T: Document>(&self, id: Id) -> Option<&T> {
        T::collection(self).iter().find(|doc| doc.id() == id)
    }

    /// Find a record by ID for mutation.
    pub fn get_mut<T: Document>(&mut self, id: Id) -> Option<&mut T> {
        T::collection_mut(self).iter_mut().find(|doc| doc.id() == id)
    }

    /// Add a record.
    pub fn insert<T: Document>(&mut self, doc: T) {
        T::collection_mut(self).push(doc);
    }

    /// Remove a record by ID, reporting whether anything was removed.
    /// Removing an unknown ID is a no-op.
    pub fn remove<T: Document>(&mut self, id: Id) -> bool {
        let collection = T::collection_mut(self);
        let before = collection.len();
        collection.retain(|doc| doc.id() != id);
        collection.len() < before
    }
}

impl Document for Voter {
    const NAME: &'static str = "voters";

    fn id(&self) -> Id {
        self.id
    }

    fn collection(data: &StoreData) -> &Vec<Self> {
        &data.voters
    }

    fn collection_mut(data: &mut StoreData) -> &mut Vec<Self> {
        &mut data.voters
    }
}

impl Document for Candidate {
    const NAME: &'static str = "candidates";

    fn id(&self) -> Id {
        self.id
    }

    fn collection(data: &StoreData) -> &Vec<Self> {
        &data.candidates
    }

    fn collection_mut(data: &mut StoreData) -> &mut Vec<Self> {
        &mut data.candidates
    }
}

impl Document for Admin {
    const NAME: &'static str = "admins";

    fn id(&self) -> Id {
        self.id
    }

    fn collection(data: &StoreData) -> &Vec<Self> {
        &data.admins
    }

    fn collection_mut(data: &mut StoreData) -> &mut Vec<Self> {
        &mut data.admins
    }
}

impl Document for Election {
    const NAME: &'static str = "elections";

    fn id(&self) -> Id {
        self.id
    }

    fn collection(data: &StoreData) -> &Vec<Self> {
        &data.elections
    }

    fn collection_mut(data: &mut StoreData) -> &mut Vec<Self> {
        &mut data.elections
    }
}
