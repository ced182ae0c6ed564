use alien_defense::collision::{collide, Collidable};
use alien_defense::sprite::{Image, Mask};
use proptest::prelude::*;

#[derive(Debug)]
struct Body {
    x: i32,
    y: i32,
    mask: Option<Mask>,
}

impl Collidable for Body {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }
}

fn solid(x: i32, y: i32, w: i32, h: i32) -> Body {
    Body {
        x,
        y,
        mask: Some(Mask::filled(w, h)),
    }
}

fn from_art(x: i32, y: i32, art: &str) -> Body {
    Body {
        x,
        y,
        mask: Some(Image::parse(art).unwrap().mask().clone()),
    }
}

// ── Mask::overlap ─────────────────────────────────────────────────────────────

#[test]
fn overlap_touching_corner_pixels() {
    let a = Mask::filled(4, 4);
    let b = Mask::filled(4, 4);
    assert!(a.overlap(&b, (3, 3)));
    assert!(a.overlap(&b, (-3, -3)));
}

#[test]
fn overlap_adjacent_is_not_a_hit() {
    let a = Mask::filled(4, 4);
    let b = Mask::filled(4, 4);
    assert!(!a.overlap(&b, (4, 0)));
    assert!(!a.overlap(&b, (0, -4)));
}

#[test]
fn overlap_with_empty_mask_is_false() {
    let a = Mask::filled(4, 4);
    assert!(!a.overlap(&Mask::new(4, 4), (0, 0)));
    assert!(!a.overlap(&Mask::new(0, 0), (0, 0)));
}

// ── collide ───────────────────────────────────────────────────────────────────

#[test]
fn collide_uses_relative_positions() {
    let a = solid(100, 100, 10, 10);
    assert!(collide(&a, &solid(109, 109, 4, 4)));
    assert!(!collide(&a, &solid(110, 100, 4, 4)));
    assert!(collide(&a, &solid(97, 97, 4, 4)));
}

#[test]
fn collide_ignores_transparent_corners() {
    // Diamond-ish ship: its bounding-box corners are empty.
    let ship = from_art(
        0,
        0,
        "..G..\n\
         .GGG.\n\
         GGGGG\n\
         .GGG.\n\
         ..G..",
    );
    assert!(!collide(&ship, &solid(0, 0, 1, 1)));
    assert!(!collide(&ship, &solid(4, 4, 1, 1)));
    assert!(collide(&ship, &solid(2, 0, 1, 1)));
    assert!(collide(&ship, &solid(2, 2, 1, 1)));
}

#[test]
fn missing_mask_never_collides() {
    let masked = solid(0, 0, 10, 10);
    let ghost = Body {
        x: 0,
        y: 0,
        mask: None,
    };
    assert!(!collide(&masked, &ghost));
    assert!(!collide(&ghost, &masked));
    assert!(!collide(&ghost, &ghost));
}

fn body() -> impl Strategy<Value = Body> {
    (1i32..6, 1i32..6)
        .prop_flat_map(|(w, h)| {
            (
                -8i32..8,
                -8i32..8,
                Just(w),
                Just(h),
                prop::collection::vec(any::<bool>(), (w * h) as usize),
            )
        })
        .prop_map(|(x, y, w, h, bits)| {
            let mut mask = Mask::new(w, h);
            for (i, opaque) in bits.into_iter().enumerate() {
                let i = i as i32;
                mask.set(i % w, i / w, opaque);
            }
            Body {
                x,
                y,
                mask: Some(mask),
            }
        })
}

proptest! {
    #[test]
    fn collide_is_symmetric(a in body(), b in body()) {
        prop_assert_eq!(collide(&a, &b), collide(&b, &a));
    }

    #[test]
    fn collide_matches_pixel_scan(a in body(), b in body()) {
        let (ma, mb) = (a.mask.as_ref().unwrap(), b.mask.as_ref().unwrap());
        let mut expected = false;
        for y in -20..20 {
            for x in -20..20 {
                if ma.get(x - a.x, y - a.y) && mb.get(x - b.x, y - b.y) {
                    expected = true;
                }
            }
        }
        prop_assert_eq!(collide(&a, &b), expected);
    }
}
