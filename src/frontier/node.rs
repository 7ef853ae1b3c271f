//! Trie node types

/// Slots of a dense node, one per byte value
pub type Slots = [Option<Box<Tier>>; 256];

/// A node in the frontier trie
///
/// An absent edge is not an error: it means every string that extends the
/// current prefix with that byte is still in the frontier.
///
/// Chains can be as deep as the longest excluded string, so dropping,
/// cloning and comparing nodes all run off an explicit stack.
#[derive(Default)]
pub enum Tier {
    /// No edges. Marks the end of an excluded string, and stands in for a
    /// node that is about to receive its first edge.
    #[default]
    Sentinel,
    /// Exactly one recorded edge
    Sparse {
        /// The byte labelling the edge
        byte: u8,
        /// The node reached through `byte`
        child: Box<Tier>,
    },
    /// One slot per byte value
    Dense(Box<Slots>),
}

impl Tier {
    /// Look up the child reached through `byte`
    pub fn get(&self, byte: u8) -> Option<&Tier> {
        match self {
            Tier::Sentinel => None,
            Tier::Sparse { byte: b, child } if *b == byte => Some(child.as_ref()),
            Tier::Sparse { .. } => None,
            Tier::Dense(slots) => slots[byte as usize].as_deref(),
        }
    }

    /// Install `subtree` at the slot reached by consuming `path` from this node
    ///
    /// Intermediate nodes are created as needed. The returned node replaces
    /// the caller's reference to `self`: it is `self` unless a sparse node had
    /// to be promoted to a dense one.
    ///
    /// An occupied slot keeps its child when `subtree` is empty, since the
    /// child already records everything `subtree` would.
    pub fn set(mut self, path: &[u8], subtree: Tier) -> Tier {
        self.insert(path, subtree);
        self
    }

    /// In-place form of [`Tier::set`]
    pub fn insert(&mut self, path: &[u8], subtree: Tier) {
        let Some((&last, init)) = path.split_last() else {
            return;
        };

        let mut node = self;
        for &byte in init {
            node = node.entry(byte);
        }
        if subtree.is_empty() && node.get(last).is_some() {
            return;
        }
        *node.entry(last) = subtree;
    }

    /// Check if this node carries no information
    pub fn is_empty(&self) -> bool {
        match self {
            Tier::Sentinel => true,
            Tier::Sparse { .. } => false,
            Tier::Dense(slots) => slots.iter().all(Option::is_none),
        }
    }

    /// Number of present edges
    pub fn edge_count(&self) -> usize {
        match self {
            Tier::Sentinel => 0,
            Tier::Sparse { .. } => 1,
            Tier::Dense(slots) => slots.iter().filter(|s| s.is_some()).count(),
        }
    }

    /// Present edges in ascending byte order
    pub fn edges(&self) -> impl Iterator<Item = (u8, &Tier)> + '_ {
        self.edges_from(0)
    }

    fn edges_from(&self, from: u16) -> impl Iterator<Item = (u8, &Tier)> + '_ {
        (from..=u8::MAX as u16)
            .filter_map(move |b| self.get(b as u8).map(|child| (b as u8, child)))
    }

    /// The child reached through `byte`, created as a sentinel if absent
    ///
    /// A sentinel turns sparse; a sparse node holding another byte is
    /// promoted to dense first.
    fn entry(&mut self, byte: u8) -> &mut Tier {
        match self {
            Tier::Sentinel => {
                *self = Tier::Sparse {
                    byte,
                    child: Box::default(),
                }
            }
            Tier::Sparse { byte: b, .. } if *b != byte => self.promote(),
            _ => {}
        }

        match self {
            Tier::Sparse { child, .. } => &mut **child,
            Tier::Dense(slots) => &mut **slots[byte as usize].get_or_insert_with(Box::default),
            Tier::Sentinel => unreachable!("sentinel replaced by a sparse node above"),
        }
    }

    /// Move a sparse node's edge into a fresh dense node
    fn promote(&mut self) {
        if let Tier::Sparse { byte, child } = self {
            let mut slots = empty_slots();
            slots[*byte as usize] = Some(std::mem::take(child));
            *self = Tier::Dense(slots);
        }
    }

    /// Rebuild this node's shape around already-copied children
    fn with_children(&self, children: Vec<(u8, Tier)>) -> Tier {
        match self {
            Tier::Sentinel => Tier::Sentinel,
            Tier::Sparse { byte, .. } => match children.into_iter().next() {
                Some((_, child)) => Tier::Sparse {
                    byte: *byte,
                    child: Box::new(child),
                },
                None => Tier::Sentinel,
            },
            Tier::Dense(_) => {
                let mut slots = empty_slots();
                for (byte, child) in children {
                    slots[byte as usize] = Some(Box::new(child));
                }
                Tier::Dense(slots)
            }
        }
    }

    /// Detach every non-sentinel child, leaving sentinels in their place
    fn detach_children(&mut self, out: &mut Vec<Tier>) {
        let mut detach = |child: &mut Box<Tier>| {
            if !matches!(**child, Tier::Sentinel) {
                out.push(std::mem::take(&mut **child));
            }
        };
        match self {
            Tier::Sentinel => {}
            Tier::Sparse { child, .. } => detach(child),
            Tier::Dense(slots) => slots.iter_mut().flatten().for_each(detach),
        }
    }
}

impl Drop for Tier {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl Clone for Tier {
    fn clone(&self) -> Self {
        // Children are copied before their parent; `next` is the first byte
        // of `src` not yet visited.
        struct Frame<'a> {
            src: &'a Tier,
            via: u8,
            next: u16,
            copies: Vec<(u8, Tier)>,
        }

        let mut stack = vec![Frame {
            src: self,
            via: 0,
            next: 0,
            copies: Vec::new(),
        }];
        while let Some(frame) = stack.last_mut() {
            let src = frame.src;
            if let Some((byte, child)) = src.edges_from(frame.next).next() {
                frame.next = byte as u16 + 1;
                stack.push(Frame {
                    src: child,
                    via: byte,
                    next: 0,
                    copies: Vec::new(),
                });
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let copy = done.src.with_children(done.copies);
            match stack.last_mut() {
                Some(parent) => parent.copies.push((done.via, copy)),
                None => return copy,
            }
        }
        Tier::Sentinel
    }
}

impl PartialEq for Tier {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            match (a, b) {
                (Tier::Sentinel, Tier::Sentinel) => {}
                (Tier::Sparse { byte: x, child: c }, Tier::Sparse { byte: y, child: d })
                    if x == y =>
                {
                    pending.push((c.as_ref(), d.as_ref()))
                }
                (Tier::Dense(s), Tier::Dense(t)) => {
                    for pair in s.iter().zip(t.iter()) {
                        match pair {
                            (Some(c), Some(d)) => pending.push((c.as_ref(), d.as_ref())),
                            (None, None) => {}
                            _ => return false,
                        }
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Tier {}

impl std::fmt::Debug for Tier {
    // Shallow: children are summarised by their edge bytes.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Sentinel => write!(f, "Sentinel"),
            Tier::Sparse { byte, .. } => f
                .debug_struct("Sparse")
                .field("byte", byte)
                .finish_non_exhaustive(),
            Tier::Dense(_) => {
                let bytes: Vec<u8> = self.edges().map(|(b, _)| b).collect();
                f.debug_tuple("Dense").field(&bytes).finish()
            }
        }
    }
}

fn empty_slots() -> Box<Slots> {
    Box::new(std::array::from_fn(|_| None))
}
