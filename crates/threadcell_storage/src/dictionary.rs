//! Symbol dictionary.
//!
//! Every name maps to an insertion-ordered chain of entries so that a
//! redefinition shadows, but does not destroy, the previous one. Each address
//! also has a reverse binding to the first name ever defined there.
//!
//! Names are case-folded to ASCII upper case on the way in.

use std::sync::Arc;

use threadcell_foundation::Address;

/// One binding of a name to an address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Case-folded name.
    pub name: Arc<str>,
    /// Address of the word's first cell.
    pub address: Address,
    /// Executes even while compiling.
    pub immediate: bool,
    /// Excluded from execution-oriented lookup.
    pub hidden: bool,
}

/// Name chains plus the address → name reverse map.
///
/// Absence is never an error here; callers decide whether a missing word is
/// fatal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dictionary {
    chains: im::HashMap<Arc<str>, im::Vector<DictionaryEntry>>,
    names: im::OrdMap<Address, Arc<str>>,
    newest: im::OrdMap<Address, Arc<str>>,
}

fn fold(name: &str) -> Arc<str> {
    Arc::from(name.to_ascii_uppercase())
}

impl Dictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. The reverse binding is registered only if `address`
    /// has none yet.
    pub fn define(&mut self, name: &str, address: Address, immediate: bool, hidden: bool) {
        let name = fold(name);
        self.names.entry(address).or_insert_with(|| name.clone());
        self.newest.insert(address, name.clone());
        self.chains
            .entry(name.clone())
            .or_default()
            .push_back(DictionaryEntry {
                name,
                address,
                immediate,
                hidden,
            });
    }

    /// Most recent entry for `name`, hidden or not.
    #[must_use]
    pub fn resolve_by_name(&self, name: &str) -> Option<&DictionaryEntry> {
        self.chains.get(&fold(name))?.last()
    }

    /// Most recent entry for `name` that is not hidden.
    #[must_use]
    pub fn resolve_for_execution(&self, name: &str) -> Option<&DictionaryEntry> {
        self.chains
            .get(&fold(name))?
            .iter()
            .rev()
            .find(|e| !e.hidden)
    }

    /// The entry at `address` in the chain of its reverse-bound name.
    ///
    /// Falls back to a bare entry carrying the bound name when the chain no
    /// longer holds that address (after [`remove`](Self::remove)).
    #[must_use]
    pub fn resolve_by_address(&self, address: Address) -> Option<DictionaryEntry> {
        let name = self.names.get(&address)?;
        let found = self
            .chains
            .get(name)
            .and_then(|chain| chain.iter().rev().find(|e| e.address == address).cloned());
        Some(found.unwrap_or_else(|| DictionaryEntry {
            name: name.clone(),
            address,
            immediate: false,
            hidden: false,
        }))
    }

    /// The name first defined at `address`.
    #[must_use]
    pub fn name_of(&self, address: Address) -> Option<&str> {
        self.names.get(&address).map(|n| &**n)
    }

    /// Drops every entry for `name`. Returns false if there were none.
    ///
    /// Reverse bindings and memory cells are left in place.
    pub fn remove(&mut self, name: &str) -> bool {
        self.chains.remove(&fold(name)).is_some()
    }

    /// Sets the hidden flag on the most recent entry at `address`.
    /// Returns false if no entry lives there.
    pub fn set_hidden(&mut self, address: Address, hidden: bool) -> bool {
        self.update(address, |e| e.hidden = hidden)
    }

    /// Sets the immediate flag on the most recent entry at `address`.
    /// Returns false if no entry lives there.
    pub fn set_immediate(&mut self, address: Address, immediate: bool) -> bool {
        self.update(address, |e| e.immediate = immediate)
    }

    /// Flips the hidden flag on the most recent entry at `address`.
    /// Returns false if no entry lives there.
    pub fn toggle_hidden(&mut self, address: Address) -> bool {
        self.update(address, |e| e.hidden = !e.hidden)
    }

    fn update(&mut self, address: Address, f: impl FnOnce(&mut DictionaryEntry)) -> bool {
        // A removed name leaves `newest` stale; the first-seen name is the
        // fallback.
        let candidates = [self.newest.get(&address), self.names.get(&address)];
        for name in candidates.into_iter().flatten() {
            let entry = self.chains.get_mut(name).and_then(|chain| {
                chain.iter_mut().rev().find(|e| e.address == address)
            });
            if let Some(entry) = entry {
                f(entry);
                return true;
            }
        }
        false
    }

    /// Names visible to execution, most recently defined first.
    #[must_use]
    pub fn visible_names(&self) -> Vec<Arc<str>> {
        let mut visible: Vec<(Address, Arc<str>)> = self
            .chains
            .iter()
            .filter_map(|(name, _)| {
                self.resolve_for_execution(name)
                    .map(|e| (e.address, name.clone()))
            })
            .collect();
        visible.sort_by(|a, b| b.0.cmp(&a.0));
        visible.into_iter().map(|(_, name)| name).collect()
    }

    /// The word whose body contains `address`: the bound address closest at
    /// or below it.
    #[must_use]
    pub fn containing(&self, address: Address) -> Option<(Address, &str)> {
        self.names
            .range(..=address)
            .next_back()
            .map(|(a, n)| (*a, &**n))
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if no names are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
