/// Single coordinate axis used for board width, height, and positions.
///
/// Signed so that neighbourhoods of edge cells can be expressed without special cases; positions outside the board
/// are legal values that the board simply treats as absent.
pub type Coord = i32;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Only meaningful for coordinates already checked with [`in_bounds`].
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = if a < 0 { 0 } else { a as CellCount };
    let b = if b < 0 { 0 } else { b as CellCount };
    a.saturating_mul(b)
}

/// Whether `coords` lies inside the rectangle `[0, width) x [0, height)`.
pub const fn in_bounds(coords: Coord2, (width, height): Coord2) -> bool {
    coords.0 >= 0 && coords.1 >= 0 && coords.0 < width && coords.1 < height
}

/// Boundary of the square of the given `radius` around `center`.
///
/// Radius `0` (or below) yields just `center`. Otherwise the `8 * radius` perimeter cells are produced by walking the
/// left edge upwards, the top edge rightwards, the right edge downwards and the bottom edge leftwards ("up" being
/// increasing `y`). Radius `1` is the Moore neighbourhood.
///
/// No bounds are applied, callers filter against their board.
pub fn ring(center: Coord2, radius: Coord) -> RingIter {
    RingIter::new(center, radius)
}

#[derive(Clone, Debug)]
pub struct RingIter {
    center: Coord2,
    radius: Coord,
    index: u64,
    len: u64,
}

impl RingIter {
    fn new(center: Coord2, radius: Coord) -> Self {
        let radius = radius.max(0);
        let len = if radius == 0 { 1 } else { 8 * radius as u64 };
        Self {
            center,
            radius,
            index: 0,
            len,
        }
    }

    fn at(&self, index: u64) -> Coord2 {
        let (x, y) = self.center;
        let r = self.radius;
        if r == 0 {
            return (x, y);
        }

        let side = 2 * r as u64;
        // k < 2r <= 2 * i32::MAX, the wrapping ops keep coordinates near the extremes total
        let k = (index % side) as i64;
        let offset = |base: Coord, delta: i64| base.wrapping_add(delta as Coord);
        let (r, k) = (r as i64, k);
        match index / side {
            0 => (offset(x, -r), offset(y, k - r)),
            1 => (offset(x, k - r), offset(y, r)),
            2 => (offset(x, r), offset(y, r - k)),
            _ => (offset(x, r - k), offset(y, -r)),
        }
    }
}

impl Iterator for RingIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let item = self.at(self.index);
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.len - self.index).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

/// [`ring`] of radius 1 restricted to the rectangle `size`.
pub fn neighbours(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    ring(center, 1).filter(move |&pos| in_bounds(pos, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;

    #[test]
    fn ring_zero_is_center() {
        assert_eq!(ring((3, -7), 0).collect::<Vec<_>>(), [(3, -7)]);
        assert_eq!(ring((3, -7), -2).collect::<Vec<_>>(), [(3, -7)]);
    }

    #[test]
    fn ring_one_walks_edges_in_order() {
        let cells: Vec<_> = ring((0, 0), 1).collect();
        assert_eq!(
            cells,
            [
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
                (1, 0),
                (1, -1),
                (0, -1),
            ]
        );
    }

    #[test]
    fn ring_has_eight_r_distinct_cells_on_the_perimeter() {
        for radius in 1..6 {
            let center = (10, 20);
            let cells: Vec<_> = ring(center, radius).collect();
            assert_eq!(cells.len(), 8 * radius as usize);

            let unique: BTreeSet<_> = cells.iter().copied().collect();
            assert_eq!(unique.len(), cells.len());

            for (x, y) in cells {
                let dx = (x - center.0).abs();
                let dy = (y - center.1).abs();
                assert_eq!(dx.max(dy), radius);
            }
        }
    }

    #[test]
    fn ring_size_hint_is_exact() {
        let mut iter = ring((0, 0), 2);
        assert_eq!(iter.size_hint(), (16, Some(16)));
        iter.next();
        assert_eq!(iter.size_hint(), (15, Some(15)));
    }

    #[test]
    fn ring_is_total_near_the_extremes() {
        assert_eq!(ring((Coord::MAX, Coord::MIN), 1).count(), 8);
    }

    #[test]
    fn neighbours_are_clipped_to_the_board() {
        let corner: BTreeSet<_> = neighbours((0, 0), (3, 3)).collect();
        assert_eq!(corner, BTreeSet::from([(0, 1), (1, 0), (1, 1)]));
        assert_eq!(neighbours((1, 1), (3, 3)).count(), 8);
        assert_eq!(neighbours((5, 5), (3, 3)).count(), 0);
    }

    #[test]
    fn mult_saturates_and_clamps_negatives() {
        assert_eq!(mult(30, 16), 480);
        assert_eq!(mult(-1, 16), 0);
        assert_eq!(mult(Coord::MAX, Coord::MAX), CellCount::MAX);
    }
}
