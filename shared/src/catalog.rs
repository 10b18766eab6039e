use std::fmt;

// Chord

/// One placeable object in the catalog.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Chord(String);

impl Chord {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Chord(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ObjectCatalog

/// Fixed, ordered list of chords for one play-through. Placement walks it
/// strictly front to back.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectCatalog {
    chords: Vec<Chord>,
}

impl ObjectCatalog {
    pub fn new(chords: Vec<Chord>) -> Self {
        Self { chords }
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Chord> {
        self.chords.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chord> {
        self.chords.iter()
    }

    /// Whether an anchor name refers to one of the catalog's chords.
    pub fn contains_name(&self, name: &str) -> bool {
        self.chords.iter().any(|chord| chord.name() == name)
    }
}

impl Default for ObjectCatalog {
    fn default() -> Self {
        Self::new(vec![
            Chord::new("C Major"),
            Chord::new("F Major"),
            Chord::new("G Major"),
            Chord::new("A Minor"),
        ])
    }
}

impl<S: Into<String>> FromIterator<S> for ObjectCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Chord::new).collect())
    }
}
