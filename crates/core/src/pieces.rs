//! Pieces module - bit-packed shape catalog
//!
//! Every rotation state is a precomputed 16-bit mask over a 4x4 grid: bit
//! `r * 4 + c` set means cell `(r, c)` is occupied. A family is a cyclic
//! sequence of one to four states and rotating simply advances the index.
//! Nothing is rotated at runtime and there are no wall kicks.

use crate::types::{PieceKind, PIECE_KIND_COUNT};

/// One rotation state: a 4x4 occupancy mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape(u16);

impl Shape {
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether cell `(r, c)` of the 4x4 grid is set.
    pub fn contains(self, r: u8, c: u8) -> bool {
        r < 4 && c < 4 && self.0 >> (r * 4 + c) & 1 == 1
    }

    /// Number of occupied cells.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Occupied `(r, c)` cells, row-major.
    pub fn cells(self) -> ShapeCells {
        ShapeCells { bits: self.0 }
    }
}

/// Lazy iterator over the set bits of a [`Shape`].
#[derive(Debug, Clone)]
pub struct ShapeCells {
    bits: u16,
}

impl Iterator for ShapeCells {
    type Item = (u8, u8);

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let bit = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some((bit / 4, bit % 4))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ShapeCells {}

const fn s(bits: u16) -> Shape {
    Shape(bits)
}

const I_STATES: [Shape; 2] = [s(15), s(4369)];
const J_STATES: [Shape; 4] = [s(113), s(275), s(71), s(802)];
const L_STATES: [Shape; 4] = [s(116), s(785), s(23), s(547)];
const O_STATES: [Shape; 1] = [s(51)];
const S_STATES: [Shape; 2] = [s(54), s(561)];
const T_STATES: [Shape; 4] = [s(39), s(562), s(114), s(305)];
const Z_STATES: [Shape; 2] = [s(99), s(306)];

/// Rotation tables indexed by family index.
const CATALOG: [&[Shape]; PIECE_KIND_COUNT] = [
    &I_STATES, &J_STATES, &L_STATES, &O_STATES, &S_STATES, &T_STATES, &Z_STATES,
];

/// All rotation states of a family, in rotation order.
pub fn rotation_states(kind: PieceKind) -> &'static [Shape] {
    CATALOG[kind.index()]
}

/// Number of distinct rotation states of a family.
pub fn rotation_count(kind: PieceKind) -> u8 {
    rotation_states(kind).len() as u8
}

/// Shape of `kind` at `rotation`, taken modulo the family's state count.
pub fn get_shape(kind: PieceKind, rotation: u8) -> Shape {
    let states = rotation_states(kind);
    states[rotation as usize % states.len()]
}

/// The rotation index after one rotate step.
pub fn next_rotation(kind: PieceKind, rotation: u8) -> u8 {
    (rotation + 1) % rotation_count(kind)
}

/// Shape a freshly spawned piece uses.
pub fn get_spawn_shape(kind: PieceKind) -> Shape {
    get_shape(kind, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_enumerates_set_bits_row_major() {
        // 113 = bits 0, 4, 5, 6
        let cells: Vec<_> = Shape::from_bits(113).cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn cells_of_empty_mask_is_empty() {
        assert_eq!(Shape::from_bits(0).cells().count(), 0);
        assert!(Shape::from_bits(0).is_empty());
    }

    #[test]
    fn cells_size_hint_is_exact() {
        let cells = Shape::from_bits(4369).cells();
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn contains_matches_cells() {
        let shape = get_spawn_shape(PieceKind::T);
        for r in 0..4 {
            for c in 0..4 {
                let listed = shape.cells().any(|cell| cell == (r, c));
                assert_eq!(shape.contains(r, c), listed);
            }
        }
        assert!(!shape.contains(4, 0));
    }

    #[test]
    fn rotation_wraps_modulo_state_count() {
        assert_eq!(get_shape(PieceKind::I, 2), get_shape(PieceKind::I, 0));
        assert_eq!(get_shape(PieceKind::O, 3), get_shape(PieceKind::O, 0));
        assert_eq!(next_rotation(PieceKind::T, 3), 0);
        assert_eq!(next_rotation(PieceKind::O, 0), 0);
    }
}
