//! Huffman tree construction, serialization, and incremental rebuild.
//!
//! The encode side builds the tree from a byte histogram gathered in a
//! pre-pass over every pixel byte, then transmits it in pre-order ahead of
//! the coded data: `0` for an inner node, `1` plus eight symbol bits for a
//! leaf. The decode side replays that bit sequence, growing the tree node by
//! node until the root's right subtree is closed.
//!
//! Nodes live in an index-addressed arena; the parent index exists solely
//! for the upward open-slot walk during incremental construction.

use std::io::{Read, Write};

use crate::bits::{BitReader, BitWriter};
use crate::error::CodecError;
use crate::row::{SegmentReader, SegmentWriter};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    /// Weight is meaningful only while building from a histogram; trees
    /// reconstructed from a bitstream carry zero weights.
    Leaf { symbol: u8, weight: u64 },
    Internal {
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
}

#[derive(Debug)]
pub(crate) struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    /// Most recently appended node; start of the open-slot walk.
    last: NodeId,
}

/// Code table: for each byte value, the root-to-leaf path as bits
/// (left = 0, right = 1). A length of zero means the symbol does not occur.
pub(crate) struct CodeTable {
    codes: [(u64, u32); 256],
}

impl CodeTable {
    pub(crate) fn code(&self, symbol: u8) -> (u64, u32) {
        self.codes[usize::from(symbol)]
    }
}

impl HuffmanTree {
    // ── Construction from a histogram (encode side) ─────────────────────

    /// Build the coding tree for a byte histogram.
    ///
    /// Leaves are created for every nonzero bucket, then repeatedly the two
    /// lightest subtrees (ties broken toward the shallower one) merge under
    /// a new inner node until one root remains. A histogram with a single
    /// distinct symbol gets a synthetic sibling leaf with `symbol + 1`
    /// (wrapping at 255) and weight 1, so the real symbol still receives a
    /// non-empty code.
    pub(crate) fn from_histogram(histogram: &[u64; 256]) -> Result<Self, CodecError> {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            last: NodeId(0),
        };
        let mut roots: Vec<NodeId> = Vec::new();
        let mut last_symbol = None;
        for (symbol, &weight) in histogram.iter().enumerate() {
            if weight > 0 {
                last_symbol = Some(symbol as u8);
                roots.push(tree.push_node(NodeKind::Leaf { symbol: symbol as u8, weight }, None));
            }
        }
        let Some(last_symbol) = last_symbol else {
            return Err(CodecError::InvalidData(
                "cannot build a coding tree for an empty data segment".into(),
            ));
        };
        if roots.len() == 1 {
            // A lone symbol would get an empty code; give it a synthetic
            // sibling. The +1 wraps at 255.
            roots.push(tree.push_node(
                NodeKind::Leaf { symbol: last_symbol.wrapping_add(1), weight: 1 },
                None,
            ));
        }

        while roots.len() > 1 {
            roots.sort_by_key(|&id| (tree.weight(id), tree.depth(id)));
            let left = roots[0];
            let right = roots[1];
            let merged = tree.push_node(
                NodeKind::Internal { left: Some(left), right: Some(right) },
                None,
            );
            tree.nodes[left.0].parent = Some(merged);
            tree.nodes[right.0].parent = Some(merged);
            roots.splice(0..2, [merged]);
        }
        tree.root = roots[0];
        tree.last = tree.root;
        Ok(tree)
    }

    fn push_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, parent });
        id
    }

    /// Sum of leaf weights below (and including) `id`, computed on demand.
    fn weight(&self, id: NodeId) -> u64 {
        match &self.nodes[id.0].kind {
            NodeKind::Leaf { weight, .. } => *weight,
            NodeKind::Internal { left, right } => {
                left.map_or(0, |l| self.weight(l)) + right.map_or(0, |r| self.weight(r))
            }
        }
    }

    /// Subtree depth; a lone leaf has depth 1.
    fn depth(&self, id: NodeId) -> u32 {
        match &self.nodes[id.0].kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Internal { left, right } => {
                let l = left.map_or(0, |l| self.depth(l));
                let r = right.map_or(0, |r| self.depth(r));
                l.max(r) + 1
            }
        }
    }

    // ── Code table ──────────────────────────────────────────────────────

    pub(crate) fn code_table(&self) -> CodeTable {
        let mut table = CodeTable { codes: [(0, 0); 256] };
        self.fill_codes(self.root, 0, 0, &mut table);
        table
    }

    fn fill_codes(&self, id: NodeId, code: u64, len: u32, table: &mut CodeTable) {
        match &self.nodes[id.0].kind {
            NodeKind::Leaf { symbol, .. } => {
                table.codes[usize::from(*symbol)] = (code, len);
            }
            NodeKind::Internal { left, right } => {
                if let Some(l) = left {
                    self.fill_codes(*l, code << 1, len + 1, table);
                }
                if let Some(r) = right {
                    self.fill_codes(*r, (code << 1) | 1, len + 1, table);
                }
            }
        }
    }

    // ── Pre-order serialization (encode side) ───────────────────────────

    /// Emit the tree shape and leaf symbols as the pre-order bit sequence.
    pub(crate) fn serialize<W: Write>(
        &self,
        bits: &mut BitWriter,
        sink: &mut SegmentWriter<W>,
    ) -> Result<(), CodecError> {
        self.serialize_node(self.root, bits, sink)
    }

    fn serialize_node<W: Write>(
        &self,
        id: NodeId,
        bits: &mut BitWriter,
        sink: &mut SegmentWriter<W>,
    ) -> Result<(), CodecError> {
        match &self.nodes[id.0].kind {
            NodeKind::Leaf { symbol, .. } => {
                bits.push(1, 1, sink)?;
                bits.push(u64::from(*symbol), 8, sink)
            }
            NodeKind::Internal { left, right } => {
                let (Some(left), Some(right)) = (*left, *right) else {
                    return Err(CodecError::TreeIncomplete);
                };
                bits.push(0, 1, sink)?;
                self.serialize_node(left, bits, sink)?;
                self.serialize_node(right, bits, sink)
            }
        }
    }

    // ── Incremental reconstruction (decode side) ────────────────────────

    /// Rebuild a tree from the head of a Huffman data segment.
    ///
    /// The root is materialized up front and the stream's first bit (its
    /// marker) discarded; every following bit appends either an empty inner
    /// node (`0`) or a leaf with eight symbol bits (`1`) at the first open
    /// slot above the previously appended node, until no slot remains.
    pub(crate) fn parse<R: Read>(
        bits: &mut BitReader,
        src: &mut SegmentReader<R>,
    ) -> Result<Self, CodecError> {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            last: NodeId(0),
        };
        tree.push_node(NodeKind::Internal { left: None, right: None }, None);

        // Discard the root marker bit.
        tree_bits(bits, src, 1)?;

        while tree.open_slot().is_some() {
            let kind = if tree_bits(bits, src, 1)? == 0 {
                NodeKind::Internal { left: None, right: None }
            } else {
                let symbol = tree_bits(bits, src, 8)? as u8;
                NodeKind::Leaf { symbol, weight: 0 }
            };
            tree.append(kind)?;
        }
        Ok(tree)
    }

    /// First open child slot at or above the last appended node.
    ///
    /// Walks upward: leaves and full inner nodes step to their parent; the
    /// walk ends at the first inner node missing a child (left checked
    /// first), or with `None` once the root has both children.
    fn open_slot(&self) -> Option<(NodeId, bool)> {
        let mut cur = self.last;
        loop {
            let node = &self.nodes[cur.0];
            match &node.kind {
                NodeKind::Leaf { .. } => cur = node.parent?,
                NodeKind::Internal { left, right } => {
                    if left.is_none() {
                        return Some((cur, true));
                    }
                    if right.is_none() {
                        return Some((cur, false));
                    }
                    cur = node.parent?;
                }
            }
        }
    }

    fn append(&mut self, kind: NodeKind) -> Result<(), CodecError> {
        let Some((parent, is_left)) = self.open_slot() else {
            return Err(CodecError::TreeIncomplete);
        };
        let id = self.push_node(kind, Some(parent));
        match &mut self.nodes[parent.0].kind {
            NodeKind::Internal { left, right } => {
                if is_left {
                    *left = Some(id);
                } else {
                    *right = Some(id);
                }
            }
            NodeKind::Leaf { .. } => return Err(CodecError::TreeIncomplete),
        }
        self.last = id;
        Ok(())
    }

    // ── Symbol decoding ─────────────────────────────────────────────────

    /// Walk the tree by coded bits until a leaf symbol is reached.
    pub(crate) fn read_symbol<R: Read>(
        &self,
        bits: &mut BitReader,
        src: &mut SegmentReader<R>,
    ) -> Result<u8, CodecError> {
        let mut cur = self.root;
        loop {
            match &self.nodes[cur.0].kind {
                NodeKind::Leaf { symbol, .. } => return Ok(*symbol),
                NodeKind::Internal { left, right } => {
                    let bit = bits
                        .take(1, src)?
                        .ok_or(CodecError::UnexpectedEof)?;
                    let next = if bit == 0 { *left } else { *right };
                    cur = next.ok_or(CodecError::TreeIncomplete)?;
                }
            }
        }
    }
}

/// Bit reads during tree parsing; exhaustion means the tree never completed.
fn tree_bits<R: Read>(
    bits: &mut BitReader,
    src: &mut SegmentReader<R>,
    count: u32,
) -> Result<u32, CodecError> {
    match bits.take(count, src) {
        Ok(Some(v)) => Ok(v),
        Ok(None) | Err(CodecError::UnexpectedEof) => Err(CodecError::TreeIncomplete),
        Err(e) => Err(e),
    }
}
