use indexmap::IndexMap;

/// Label -> address bindings. Each entry is created exactly once and
/// iterated in definition order for deterministic display.
#[derive(Debug, Default)]
pub struct Symbols(IndexMap<String, usize>);

impl Symbols {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    pub fn insert(&mut self, name: String, address: usize) {
        self.0.insert(name, address);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, addr)| (name.as_str(), *addr))
    }
}

/// One deferred write: the image position waiting for a label, plus the
/// offset recorded from a `LABEL + NUMBER` operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub position: usize,
    pub offset: i32,
}

/// Forward references in first-use order. A label seen again before its
/// definition extends its entry rather than creating a new one.
#[derive(Debug, Default)]
pub struct Pendings(IndexMap<String, Vec<Slot>>);

impl Pendings {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn add(&mut self, name: &str, position: usize, offset: i32) {
        self.0
            .entry(name.to_string())
            .or_default()
            .push(Slot { position, offset });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Slot])> {
        self.0.iter().map(|(name, slots)| (name.as_str(), slots.as_slice()))
    }

    /// Hand the whole list to the resolution pass; it is consumed exactly
    /// once.
    pub(crate) fn take(&mut self) -> IndexMap<String, Vec<Slot>> {
        std::mem::take(&mut self.0)
    }
}
