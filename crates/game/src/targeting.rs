//! Ray targeting for both input modes.
//!
//! Desktop rays come from the mouse (free cursor) or the crosshair (locked
//! cursor); VR rays come from the controllers. Either way, one resolution
//! pass decides what the ray means, in strict priority order: the open
//! dialogue panel first, then character hit cylinders, then grabbable props.

use crate::npc::Npc;
use crate::panel::{PanelLayout, PANEL_WORLD_SIZE};
use crate::props::Prop;
use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayTarget {
    /// The close button of the open dialogue panel.
    DialogueClose { npc: usize },
    /// An option row of the open dialogue panel.
    DialogueOption { npc: usize, option: usize },
    /// The open panel's background; consumed so clicks cannot fall through.
    DialoguePanel { npc: usize },
    Npc { npc: usize },
    Prop { prop: usize },
}

/// Ray against a vertical cylinder. Returns the entry distance.
pub fn ray_vs_cylinder(
    origin: Vec3,
    dir: Vec3,
    center_xz: Vec2,
    radius: f32,
    y_min: f32,
    y_max: f32,
) -> Option<f32> {
    let ox = origin.x - center_xz.x;
    let oz = origin.z - center_xz.y;
    let a = dir.x * dir.x + dir.z * dir.z;

    if a < 1e-8 {
        // Vertical ray: inside the disc or not at all.
        if ox * ox + oz * oz > radius * radius {
            return None;
        }
        let t = if dir.y > 0.0 {
            (y_min - origin.y) / dir.y
        } else {
            (y_max - origin.y) / dir.y
        };
        return (t >= 0.0).then_some(t.max(0.0));
    }

    let b = 2.0 * (ox * dir.x + oz * dir.z);
    let c = ox * ox + oz * oz - radius * radius;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    for t in [(-b - sqrt) / (2.0 * a), (-b + sqrt) / (2.0 * a)] {
        if t < 0.0 {
            continue;
        }
        let y = origin.y + dir.y * t;
        if y >= y_min && y <= y_max {
            return Some(t);
        }
    }
    None
}

/// Ray against the (billboarded) panel plane. Returns the hit distance and
/// the hit point in panel-local coordinates, +y up.
pub fn ray_vs_panel(
    origin: Vec3,
    dir: Vec3,
    panel_pos: Vec3,
    panel_rot: glam::Quat,
) -> Option<(f32, Vec2)> {
    let normal = panel_rot * Vec3::Z;
    let denom = dir.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (panel_pos - origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let local = panel_rot.inverse() * (origin + dir * t - panel_pos);
    Some((t, Vec2::new(local.x, local.y)))
}

/// Ray against an oriented box prop. Slab test in the prop's local frame.
pub fn ray_vs_prop(origin: Vec3, dir: Vec3, prop: &Prop) -> Option<f32> {
    let inverse = prop.rotation.inverse();
    let o = inverse * (origin - prop.position);
    let d = inverse * dir;

    let mut t_min = 0.0f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let (o, d, h) = (o[axis], d[axis], prop.half_extents[axis]);
        if d.abs() < 1e-8 {
            if o.abs() > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        t_min = t_min.max(near);
        t_max = t_max.min(far);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

/// Decide what a ray points at. `layouts` is parallel to `npcs` and holds
/// the painted layout for any character whose panel is showing;
/// `current_interaction` is the character whose conversation is open.
pub fn resolve_target(
    origin: Vec3,
    dir: Vec3,
    npcs: &[Npc],
    layouts: &[Option<&PanelLayout>],
    props: &[Prop],
    current_interaction: Option<usize>,
) -> Option<RayTarget> {
    // The open panel occludes everything behind it.
    if let Some(i) = current_interaction {
        if let Some(layout) = layouts.get(i).copied().flatten() {
            let npc = &npcs[i];
            if let Some((_, local)) =
                ray_vs_panel(origin, dir, npc.panel_position(), npc.panel_rotation)
            {
                if layout.close.contains(local) {
                    return Some(RayTarget::DialogueClose { npc: i });
                }
                for (option, zone) in layout.options.iter().enumerate() {
                    if zone.contains(local) {
                        return Some(RayTarget::DialogueOption { npc: i, option });
                    }
                }
                let half = PANEL_WORLD_SIZE / 2.0;
                if local.x.abs() <= half && local.y.abs() <= half {
                    return Some(RayTarget::DialoguePanel { npc: i });
                }
            }
        }
    }

    // Closest character hit cylinder.
    let mut best: Option<(f32, usize)> = None;
    for (i, npc) in npcs.iter().enumerate() {
        if npc.interacting {
            continue;
        }
        let (y_min, y_max) = npc.hitbox.y_range(npc.position.y);
        let center = Vec2::new(npc.position.x, npc.position.z);
        if let Some(t) = ray_vs_cylinder(origin, dir, center, npc.hitbox.radius, y_min, y_max) {
            if best.map_or(true, |(bt, _)| t < bt) {
                best = Some((t, i));
            }
        }
    }
    if let Some((_, i)) = best {
        return Some(RayTarget::Npc { npc: i });
    }

    // Closest free prop.
    let mut best: Option<(f32, usize)> = None;
    for (i, prop) in props.iter().enumerate() {
        if prop.is_held() {
            continue;
        }
        if let Some(t) = ray_vs_prop(origin, dir, prop) {
            if best.map_or(true, |(bt, _)| t < bt) {
                best = Some((t, i));
            }
        }
    }
    best.map(|(_, prop)| RayTarget::Prop { prop })
}

/// Interact-key fallback: the closest character within the extended reach,
/// used when the crosshair ray hits nothing. Distance is planar; eye height
/// against character base height must not shrink the reach.
pub fn nearest_npc_within_reach(npcs: &[Npc], player: Vec3, factor: f32) -> Option<usize> {
    let player_xz = Vec2::new(player.x, player.z);
    npcs.iter()
        .enumerate()
        .filter(|(_, npc)| !npc.interacting)
        .map(|(i, npc)| {
            let npc_xz = Vec2::new(npc.position.x, npc.position.z);
            (i, npc_xz.distance(player_xz))
        })
        .filter(|(i, d)| *d <= npcs[*i].interaction_radius * factor)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::panel_content;
    use crate::npc::spawn_npcs;
    use crate::panel::render_dialogue_panel;
    use glam::Quat;

    #[test]
    fn cylinder_hit_and_miss() {
        let t = ray_vs_cylinder(
            Vec3::new(0.0, 1.7, 5.0),
            Vec3::NEG_Z,
            Vec2::ZERO,
            0.7,
            0.5,
            3.5,
        )
        .unwrap();
        assert!((t - 4.3).abs() < 1e-4);

        // Aimed over the cylinder's top.
        assert!(ray_vs_cylinder(
            Vec3::new(0.0, 4.0, 5.0),
            Vec3::NEG_Z,
            Vec2::ZERO,
            0.7,
            0.5,
            3.5,
        )
        .is_none());

        // Aimed wide.
        assert!(ray_vs_cylinder(
            Vec3::new(2.0, 1.7, 5.0),
            Vec3::NEG_Z,
            Vec2::ZERO,
            0.7,
            0.5,
            3.5,
        )
        .is_none());
    }

    #[test]
    fn panel_local_coordinates_are_centered() {
        let pos = Vec3::new(0.0, 2.0, -3.0);
        let (t, local) = ray_vs_panel(
            Vec3::new(0.5, 2.5, 0.0),
            Vec3::NEG_Z,
            pos,
            Quat::IDENTITY,
        )
        .unwrap();
        assert!((t - 3.0).abs() < 1e-5);
        assert!((local - Vec2::new(0.5, 0.5)).length() < 1e-5);
    }

    #[test]
    fn prop_slab_test() {
        let prop = Prop::new("cube", Vec3::new(0.0, 1.0, -2.0), Vec3::splat(0.12), [1.0; 4]);
        let t = ray_vs_prop(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, &prop).unwrap();
        assert!((t - 1.88).abs() < 1e-4);
        assert!(ray_vs_prop(Vec3::new(1.0, 1.0, 0.0), Vec3::NEG_Z, &prop).is_none());
    }

    #[test]
    fn open_panel_takes_priority_over_characters() {
        let mut npcs = spawn_npcs();
        npcs[0].interacting = true;
        npcs[0].panel_rotation = Quat::IDENTITY;
        // A second character standing right behind the panel.
        npcs[1].fixed_anchor = None;
        npcs[1].position = npcs[0].panel_position() + Vec3::new(0.0, -1.5, -1.0);

        let content = panel_content(&npcs[0].script, &npcs[0].fsm);
        let layout = render_dialogue_panel(npcs[0].name, npcs[0].role, &content, None).unwrap();
        let layouts = [Some(&layout), None];

        // Fire straight at the first option row.
        let zone = layout.options[0];
        let target_point =
            npcs[0].panel_position() + Vec3::new(zone.center.x, zone.center.y, 0.0);
        let origin = target_point + Vec3::Z * 5.0;
        let hit = resolve_target(origin, Vec3::NEG_Z, &npcs, &layouts, &[], Some(0));
        assert_eq!(hit, Some(RayTarget::DialogueOption { npc: 0, option: 0 }));
    }

    #[test]
    fn panel_background_consumes_the_ray() {
        let mut npcs = spawn_npcs();
        npcs[0].interacting = true;
        npcs[0].panel_rotation = Quat::IDENTITY;
        let content = panel_content(&npcs[0].script, &npcs[0].fsm);
        let layout = render_dialogue_panel(npcs[0].name, npcs[0].role, &content, None).unwrap();
        let layouts = [Some(&layout), None];

        // Between the header and the body there are no zones.
        let origin = npcs[0].panel_position() + Vec3::new(-1.2, 0.0, 5.0);
        let hit = resolve_target(origin, Vec3::NEG_Z, &npcs, &layouts, &[], Some(0));
        assert_eq!(hit, Some(RayTarget::DialoguePanel { npc: 0 }));
    }

    #[test]
    fn characters_beat_props_regardless_of_distance() {
        let npcs = spawn_npcs();
        let props = vec![Prop::new(
            "cube",
            Vec3::new(0.0, 1.7, -1.0),
            Vec3::splat(0.12),
            [1.0; 4],
        )];
        // Maya stands at z = -4; the prop is closer on the same ray.
        let origin = Vec3::new(0.0, 1.7, 2.0);
        let hit = resolve_target(origin, Vec3::NEG_Z, &npcs, &[None, None], &props, None);
        assert_eq!(hit, Some(RayTarget::Npc { npc: 0 }));
    }

    #[test]
    fn fallback_reaches_the_closest_character_in_range() {
        let npcs = spawn_npcs();
        // Maya at (0, 0.9, -4), radius 4, fallback factor 1.35 => reach 5.4.
        let player = Vec3::new(0.0, 1.7, 1.0);
        assert_eq!(nearest_npc_within_reach(&npcs, player, 1.35), Some(0));
        let far = Vec3::new(0.0, 1.7, 2.0);
        assert_eq!(nearest_npc_within_reach(&npcs, far, 1.35), None);
    }

    #[test]
    fn fallback_reach_ignores_eye_height() {
        let npcs = spawn_npcs();
        // Planar distance 5.39 is just inside the 5.4 reach even though the
        // 3D distance (eye at 1.7 vs base at 0.9) exceeds it.
        let player = Vec3::new(0.0, 1.7, 1.39);
        assert_eq!(nearest_npc_within_reach(&npcs, player, 1.35), Some(0));
        // And just past the planar boundary it drops out.
        let outside = Vec3::new(0.0, 1.7, 1.41);
        assert_eq!(nearest_npc_within_reach(&npcs, outside, 1.35), None);
    }

    #[test]
    fn interacting_characters_are_not_retargeted() {
        let mut npcs = spawn_npcs();
        npcs[0].interacting = true;
        let origin = Vec3::new(0.0, 1.7, 2.0);
        let hit = resolve_target(origin, Vec3::NEG_Z, &npcs, &[None, None], &[], None);
        assert_eq!(hit, None);
    }
}
