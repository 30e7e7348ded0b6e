use facet::Facet;
use std::fmt;

/// Address of a nested observable within the snapshot tree.
///
/// Each element is the emission index, within the parent stream, of the
/// nested-observable item that leads one level deeper. The empty path is the
/// root stream. A path is assigned once, when the nested stream is first
/// observed, and never changes — even though the lane the observable ends up
/// on is decided separately, by spawn-time ordering.
#[derive(Facet, Debug, Clone, PartialEq, Eq, Hash, Default)]
#[facet(transparent)]
pub struct Path(Vec<u32>);

impl Path {
    /// The root stream's address.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Extends this path with the emission index of a nested stream.
    pub fn child(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<u32>> for Path {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (position, index) in self.0.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "]")
    }
}
