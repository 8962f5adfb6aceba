//! Ancestor stack used while reading
//!
//! The top entry receives parameter and data lines; the one below it is the
//! parent the top will be attached to. An [`Slot::Invalid`] entry stands for a
//! layer that could not be opened: lines addressed to it are skipped.

/// One stack entry.
#[derive(Debug)]
pub enum Slot<T> {
    Node(T),
    Invalid,
}

impl<T> Slot<T> {
    pub fn node(&self) -> Option<&T> {
        match self {
            Slot::Node(node) => Some(node),
            Slot::Invalid => None,
        }
    }

    pub fn node_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Node(node) => Some(node),
            Slot::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Slot::Invalid)
    }
}

/// Explicit stack of open layers.
#[derive(Debug)]
pub struct LayerStack<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for LayerStack<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> LayerStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: T) {
        self.slots.push(Slot::Node(node));
    }

    /// Record that the most recently opened layer is unusable.
    pub fn push_invalid(&mut self) {
        self.slots.push(Slot::Invalid);
    }

    pub fn pop(&mut self) -> Option<Slot<T>> {
        self.slots.pop()
    }

    pub fn top(&self) -> Option<&Slot<T>> {
        self.slots.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Slot<T>> {
        self.slots.last_mut()
    }

    pub fn second(&self) -> Option<&Slot<T>> {
        self.slots.len().checked_sub(2).map(|i| &self.slots[i])
    }

    /// Top and second entries, both mutable.
    pub fn top_pair_mut(&mut self) -> Option<(&mut Slot<T>, &mut Slot<T>)> {
        let (top, rest) = self.slots.split_last_mut()?;
        let second = rest.last_mut()?;
        Some((top, second))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}
