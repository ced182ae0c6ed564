//! Mask-accurate hit testing.
//!
//! Ship sprites are not rectangles, so hits are decided on opaque pixels
//! rather than bounding boxes.

use crate::sprite::Mask;

/// Anything that sits somewhere on the play area and may have a mask.
pub trait Collidable {
    fn position(&self) -> (i32, i32);
    fn mask(&self) -> Option<&Mask>;
}

/// Something a projectile can damage.
pub trait Target: Collidable {
    fn take_hit(&mut self, damage: i32);
}

/// True when the opaque pixels of `a` and `b` overlap at their current
/// positions.  A missing mask on either side never collides.
pub fn collide<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let (Some(mask_a), Some(mask_b)) = (a.mask(), b.mask()) else {
        return false;
    };
    let (ax, ay) = a.position();
    let (bx, by) = b.position();
    mask_a.overlap(mask_b, (bx - ax, by - ay))
}
