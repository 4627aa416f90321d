//! Name dictionary for the binary stream
//!
//!     Tag names and attribute keys repeat heavily in social-network
//!     documents, so the stream carries each distinct name once and the
//!     node records refer to them by id. Ids are assigned in first-seen
//!     order over the encoding walk, which makes the dictionary section
//!     deterministic for a given tree.

use std::collections::HashMap;

use crate::error::{CodecError, CodecErrorKind};

pub(super) struct Dictionary {
    entries: Vec<String>,
    index: HashMap<String, u32>,
}

impl Dictionary {
    pub(super) fn new() -> Self {
        Dictionary {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Rebuild a dictionary from a decoded entry list.
    pub(super) fn from_entries(entries: Vec<String>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i as u32))
            .collect();
        Dictionary { entries, index }
    }

    /// Intern `name`, returning its id; repeat calls return the first id.
    pub(super) fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.entries.len() as u32;
        self.entries.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    /// Id of an already-interned name. The encoder interns every name in
    /// its collection pass, so a miss here is an internal bug.
    pub(super) fn id_of(&self, name: &str) -> u32 {
        self.index[name]
    }

    /// Entry for `id`, or [`CodecErrorKind::UnknownId`] positioned at the
    /// id's place in the stream. The sentinel id (one past the last
    /// entry) fails here too; only the decoder's document record treats
    /// it specially.
    pub(super) fn resolve(&self, id: u64, offset: usize) -> Result<&str, CodecError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
            .ok_or_else(|| {
                CodecError::new(
                    CodecErrorKind::UnknownId,
                    offset,
                    format!(
                        "id {} out of range (dictionary has {} entries)",
                        id,
                        self.entries.len()
                    ),
                )
            })
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn entries(&self) -> &[String] {
        &self.entries
    }
}
