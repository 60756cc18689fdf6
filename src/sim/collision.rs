//! Collision detection and response for the playfield
//!
//! The player is the only dynamic body. Platforms are static solids; coins,
//! power-ups and obstacles are overlap-only triggers.

use glam::Vec2;

use super::geometry::Rect;

/// Velocity + contact state of a dynamic body
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    pub vel: Vec2,
    /// Standing on a solid after the last step
    pub grounded: bool,
}

impl Body {
    /// Launch upward with the given speed
    pub fn jump(&mut self, force: f32) {
        self.vel.y = -force;
        self.grounded = false;
    }
}

/// What happened during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Body touched down this step after being airborne
    pub landed: bool,
    /// Body hit its head on the underside of a solid
    pub bumped: bool,
}

/// Anything the player can touch without being pushed back
pub trait Trigger {
    fn id(&self) -> u32;
    /// Already scheduled for removal this tick
    fn is_destroyed(&self) -> bool;
    fn touches(&self, player: &Rect) -> bool;
}

/// Overlap depth below which two boxes are treated as merely touching
const CONTACT_EPSILON: f32 = 0.01;

/// Advance a centre-anchored box under gravity and resolve it against solids.
///
/// Axes are resolved separately (x first, then y) so a body sliding along a
/// floor never snags on the seam between two solids.
pub fn step_body(
    pos: &mut Vec2,
    size: Vec2,
    body: &mut Body,
    walk_dx: f32,
    gravity: f32,
    dt: f32,
    solids: &[Rect],
) -> StepReport {
    let mut report = StepReport::default();
    let was_grounded = body.grounded;
    let half = size / 2.0;

    body.vel.y += gravity * dt;

    // Horizontal
    let dx = walk_dx + body.vel.x * dt;
    if dx != 0.0 {
        pos.x += dx;
        for solid in solids {
            let rect = Rect::from_center(*pos, size);
            if !rect.overlaps(solid) || overlap_y(&rect, solid) <= CONTACT_EPSILON {
                continue;
            }
            pos.x = if dx > 0.0 {
                solid.min.x - half.x
            } else {
                solid.max().x + half.x
            };
            body.vel.x = 0.0;
        }
    }

    // Vertical
    let dy = body.vel.y * dt;
    pos.y += dy;
    let mut on_floor = false;
    for solid in solids {
        let rect = Rect::from_center(*pos, size);
        if !rect.overlaps(solid) || overlap_x(&rect, solid) <= CONTACT_EPSILON {
            continue;
        }
        let from_above = if dy != 0.0 {
            dy > 0.0
        } else {
            rect.center().y < solid.center().y
        };
        if from_above {
            pos.y = solid.min.y - half.y;
            body.vel.y = body.vel.y.min(0.0);
            on_floor = true;
        } else {
            pos.y = solid.max().y + half.y;
            body.vel.y = body.vel.y.max(0.0);
            report.bumped = true;
        }
    }

    body.grounded = on_floor;
    report.landed = on_floor && !was_grounded;
    report
}

fn overlap_x(a: &Rect, b: &Rect) -> f32 {
    a.max().x.min(b.max().x) - a.min.x.max(b.min.x)
}

fn overlap_y(a: &Rect, b: &Rect) -> f32 {
    a.max().y.min(b.max().y) - a.min.y.max(b.min.y)
}

/// IDs of live triggers touching the player, in slice order
pub fn overlapping<T: Trigger>(player: &Rect, triggers: &[T]) -> Vec<u32> {
    triggers
        .iter()
        .filter(|t| !t.is_destroyed() && t.touches(player))
        .map(|t| t.id())
        .collect()
}
