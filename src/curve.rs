//! Cubic Bezier curves mapping a block position to noise coordinates.

use crate::config::CurveArithmetic;
use crate::field::{BinaryField, Word, ELEMENTS};

/// Evaluates cubic Bezier blends with one fixed arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct CurveMapper<W: Word> {
    arithmetic: CurveArithmetic,
    field: BinaryField<W>,
}

impl<W: Word> CurveMapper<W> {
    /// Create a mapper; `field` is only used with [`CurveArithmetic::Field`].
    pub fn new(arithmetic: CurveArithmetic, field: BinaryField<W>) -> Self {
        Self { arithmetic, field }
    }

    /// `(1-t)³·p1 + 3(1-t)²t·p2 + 3(1-t)t²·p3 + t³·p4`, where `1` is `MAX`.
    pub fn bezier(&self, points: [W; 4], t: W) -> W {
        match self.arithmetic {
            CurveArithmetic::Wrapping => bezier_wrapping(points, t),
            CurveArithmetic::Field => bezier_field(&self.field, points, t),
        }
    }

    /// Evaluate both curves of `polygon` at `t`.
    pub fn point_at(&self, polygon: &ControlPolygon<W>, t: W) -> (W, W) {
        (self.bezier(polygon.xs, t), self.bezier(polygon.ys, t))
    }
}

/// Bezier blend in integer arithmetic modulo 2^w.
pub fn bezier_wrapping<W: Word>(points: [W; 4], t: W) -> W {
    let three = W::from_u64(3);
    let mt = W::MAX.wrapping_sub(t);
    let c1 = mt.wrapping_mul(mt).wrapping_mul(mt);
    let c2 = mt.wrapping_mul(mt).wrapping_mul(t).wrapping_mul(three);
    let c3 = mt.wrapping_mul(t).wrapping_mul(t).wrapping_mul(three);
    let c4 = t.wrapping_mul(t).wrapping_mul(t);
    let [p1, p2, p3, p4] = points;
    c1.wrapping_mul(p1)
        .wrapping_add(c2.wrapping_mul(p2))
        .wrapping_add(c3.wrapping_mul(p3))
        .wrapping_add(c4.wrapping_mul(p4))
}

/// Bezier blend in GF(2^w); the complement of `t` is `MAX ⊕ t`.
pub fn bezier_field<W: Word>(field: &BinaryField<W>, points: [W; 4], t: W) -> W {
    let three = W::from_u64(3);
    let mt = W::MAX ^ t;
    let mt2 = field.square(mt);
    let t2 = field.square(t);
    let c1 = field.mul(mt2, mt);
    let c2 = field.mul(field.mul(mt2, t), three);
    let c3 = field.mul(field.mul(mt, t2), three);
    let c4 = field.mul(t2, t);
    let [p1, p2, p3, p4] = points;
    field.mul(c1, p1) ^ field.mul(c2, p2) ^ field.mul(c3, p3) ^ field.mul(c4, p4)
}

/// Four control points, stored as separate x and y coordinate arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPolygon<W: Word> {
    /// x coordinates of p1..p4.
    pub xs: [W; 4],
    /// y coordinates of p1..p4.
    pub ys: [W; 4],
}

impl<W: Word> ControlPolygon<W> {
    /// Key elements used directly: x from 0, 2, 4, 6 and y from 1, 3, 5, 7.
    pub fn interleaved(elements: &[W; ELEMENTS]) -> Self {
        Self {
            xs: [elements[0], elements[2], elements[4], elements[6]],
            ys: [elements[1], elements[3], elements[5], elements[7]],
        }
    }

    /// A fixed quadrilateral perturbed by the key.
    ///
    /// Corners sit at the quarter points `q = 2^(w-2)` and `3q`. Elements
    /// 0..4 each move one corner's x and the next corner's y; elements 4..8
    /// fold into a shared scale term added to every y. All perturbations are
    /// reduced modulo `MAX >> 2` so every corner stays in its quadrant.
    pub fn keyed_quadrilateral(elements: &[W; ELEMENTS]) -> Self {
        let reduce = W::MAX >> 2;
        let q = W::ONE << (W::BITS - 2);
        let q3 = q | (q << 1);
        let base = [(q, q), (q, q3), (q3, q3), (q3, q)];

        let offsets: [W; 4] = std::array::from_fn(|i| elements[i] % reduce);
        let scale = elements[4..]
            .iter()
            .fold(W::ZERO, |acc, &element| acc ^ (element % reduce));

        Self {
            xs: std::array::from_fn(|i| base[i].0 ^ offsets[i]),
            ys: std::array::from_fn(|i| base[i].1 ^ offsets[(i + 1) % 4] ^ scale),
        }
    }
}
