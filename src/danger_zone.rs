/// Vertical danger zone cycle: Idle → Warning → Active → Idle.
///
/// The cycle is autonomous; nothing but a session restart resets it.

use rand::Rng;

use crate::consts::{DANGER_ZONE_ACTIVE, DANGER_ZONE_COOLDOWN, DANGER_ZONE_WARNING, WIDTH};
use crate::entities::{DangerZone, ZonePhase};
use crate::geometry::Rect;

/// Random left edge that keeps the whole column on screen.
pub fn random_x(rng: &mut impl Rng) -> f32 {
    let max_x = (WIDTH - DangerZone::width()) as i32;
    rng.gen_range(0..=max_x) as f32
}

/// Advance one tick. The zone jumps to a new column when it starts warning.
pub fn advance(zone: &DangerZone, rng: &mut impl Rng) -> DangerZone {
    match zone.phase {
        ZonePhase::Idle { cooldown } => {
            let cooldown = cooldown.saturating_sub(1);
            if cooldown == 0 {
                let x = random_x(rng);
                log::debug!("danger zone warning at x={}", x);
                DangerZone {
                    rect: Rect { x, ..zone.rect },
                    phase: ZonePhase::Warning {
                        remaining: DANGER_ZONE_WARNING,
                    },
                }
            } else {
                DangerZone {
                    phase: ZonePhase::Idle { cooldown },
                    ..zone.clone()
                }
            }
        }
        ZonePhase::Warning { remaining } => {
            let remaining = remaining.saturating_sub(1);
            let phase = if remaining == 0 {
                log::debug!("danger zone active");
                ZonePhase::Active {
                    remaining: DANGER_ZONE_ACTIVE,
                }
            } else {
                ZonePhase::Warning { remaining }
            };
            DangerZone { phase, ..zone.clone() }
        }
        ZonePhase::Active { remaining } => {
            let remaining = remaining.saturating_sub(1);
            let phase = if remaining == 0 {
                log::debug!("danger zone idle");
                ZonePhase::Idle {
                    cooldown: DANGER_ZONE_COOLDOWN,
                }
            } else {
                ZonePhase::Active { remaining }
            };
            DangerZone { phase, ..zone.clone() }
        }
    }
}

/// Only an active zone hurts.
pub fn check_collision(zone: &DangerZone, target: &Rect) -> bool {
    zone.is_active() && zone.rect.intersects(target)
}
