//! The office floor plan: wall runs with door openings, split into solid
//! segments (plus lintels over each opening) and door placements.

use glam::{Vec2, Vec3};

/// Room footprint side length in meters.
pub const ROOM_SIZE: f32 = 100.0;
/// Room (and full wall) height in meters.
pub const ROOM_HEIGHT: f32 = 5.0;
/// Interior partition wall thickness.
pub const WALL_THICKNESS: f32 = 0.12;
/// Default door leaf width before opening clearance.
pub const DOOR_WIDTH: f32 = 1.55;
/// Extra opening width around the leaf so it never scrapes the jambs.
pub const DOOR_OPENING_CLEARANCE: f32 = 0.26;
/// Doors are shorter than the walls; a lintel closes the gap above.
pub const DOOR_TARGET_HEIGHT: f32 = 2.8;
/// Wall fragments shorter than this are dropped.
pub const MIN_WALL_SEGMENT: f32 = 0.35;
/// Upper bound on animated doors in a scene.
pub const MAX_ACTIVE_DOORS: usize = 36;

/// A straight wall run with zero or more door openings along it.
#[derive(Debug, Clone)]
pub struct WallSpec {
    pub start: Vec2,
    pub end: Vec2,
    /// Opening centers as distances from `start` along the run.
    pub door_centers: Vec<f32>,
    /// Per-run door width override, clamped to a sane range.
    pub door_width: Option<f32>,
}

impl WallSpec {
    pub fn solid(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            door_centers: Vec::new(),
            door_width: None,
        }
    }

    pub fn with_doors(start: Vec2, end: Vec2, door_centers: Vec<f32>) -> Self {
        Self {
            start,
            end,
            door_centers,
            door_width: None,
        }
    }
}

/// A renderable solid wall piece: an oriented box in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    /// Box center in world space.
    pub center: Vec3,
    /// Extent along the run direction.
    pub length: f32,
    pub height: f32,
    pub thickness: f32,
    /// Yaw such that rotating local +X by it yields the run direction.
    pub yaw: f32,
}

/// Where a door sits: the opening center, its orientation, and the wall's
/// unit normal (perpendicular to the run, in the XZ plane).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorPlacement {
    pub position: Vec2,
    pub yaw: f32,
    pub normal: Vec2,
    pub opening_width: f32,
}

fn resolve_door_width(spec: &WallSpec) -> f32 {
    let leaf = spec.door_width.unwrap_or(DOOR_WIDTH).clamp(1.2, 1.9);
    (leaf + DOOR_OPENING_CLEARANCE).max(1.0)
}

struct Run {
    dir: Vec2,
    yaw: f32,
    length: f32,
}

fn resolve_run(spec: &WallSpec) -> Option<Run> {
    let delta = spec.end - spec.start;
    let length = delta.length();
    if length < MIN_WALL_SEGMENT {
        return None;
    }
    let dir = delta / length;
    // glam's Y rotation maps +X to (cos, 0, -sin), hence the negated Z.
    let yaw = (-dir.y).atan2(dir.x);
    Some(Run { dir, yaw, length })
}

fn segment(spec: &WallSpec, run: &Run, start: f32, end: f32, height: f32, center_y: f32) -> WallSegment {
    let mid = start + (end - start) / 2.0;
    let at = spec.start + run.dir * mid;
    WallSegment {
        center: Vec3::new(at.x, center_y, at.y),
        length: end - start,
        height,
        thickness: WALL_THICKNESS,
        yaw: run.yaw,
    }
}

/// Split wall runs into solid segments around door openings. Each opening
/// also produces a lintel segment from the door top up to the ceiling.
pub fn build_wall_segments(specs: &[WallSpec]) -> Vec<WallSegment> {
    let mut segments = Vec::new();
    let lintel_height = (ROOM_HEIGHT - DOOR_TARGET_HEIGHT).max(0.0);

    for spec in specs {
        let Some(run) = resolve_run(spec) else {
            continue;
        };
        let door_width = resolve_door_width(spec);

        let mut openings: Vec<(f32, f32)> = spec
            .door_centers
            .iter()
            .map(|&center| {
                (
                    (center - door_width / 2.0).max(0.0),
                    (center + door_width / 2.0).min(run.length),
                )
            })
            .filter(|(start, end)| end - start > MIN_WALL_SEGMENT)
            .collect();
        openings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut cursor = 0.0;
        for (open_start, open_end) in openings {
            if open_start - cursor > MIN_WALL_SEGMENT {
                segments.push(segment(
                    spec,
                    &run,
                    cursor,
                    open_start,
                    ROOM_HEIGHT,
                    ROOM_HEIGHT / 2.0,
                ));
            }
            if lintel_height > 0.05 && open_end - open_start > MIN_WALL_SEGMENT {
                segments.push(segment(
                    spec,
                    &run,
                    open_start,
                    open_end,
                    lintel_height,
                    DOOR_TARGET_HEIGHT + lintel_height / 2.0,
                ));
            }
            cursor = cursor.max(open_end);
        }
        if run.length - cursor > MIN_WALL_SEGMENT {
            segments.push(segment(
                spec,
                &run,
                cursor,
                run.length,
                ROOM_HEIGHT,
                ROOM_HEIGHT / 2.0,
            ));
        }
    }

    segments
}

/// One placement per door center, clamped so the opening stays inside the
/// wall run. The normal is the run direction rotated a quarter turn.
pub fn build_door_placements(specs: &[WallSpec]) -> Vec<DoorPlacement> {
    let mut placements = Vec::new();

    for spec in specs {
        if spec.door_centers.is_empty() {
            continue;
        }
        let Some(run) = resolve_run(spec) else {
            continue;
        };
        let door_width = resolve_door_width(spec);

        for &center in &spec.door_centers {
            let clamped = center.clamp(
                door_width / 2.0,
                (run.length - door_width / 2.0).max(door_width / 2.0),
            );
            placements.push(DoorPlacement {
                position: spec.start + run.dir * clamped,
                yaw: run.yaw,
                normal: Vec2::new(-run.dir.y, run.dir.x),
                opening_width: door_width,
            });
        }
    }

    placements.truncate(MAX_ACTIVE_DOORS);
    placements
}

/// The four room boundary walls.
pub fn perimeter_walls() -> Vec<WallSpec> {
    let half = ROOM_SIZE / 2.0;
    vec![
        WallSpec::solid(Vec2::new(-half, -half), Vec2::new(half, -half)),
        WallSpec::solid(Vec2::new(-half, half), Vec2::new(half, half)),
        WallSpec::solid(Vec2::new(-half, -half), Vec2::new(-half, half)),
        WallSpec::solid(Vec2::new(half, -half), Vec2::new(half, half)),
    ]
}

/// The interior office partitions. Two corridor walls run east-west with a
/// row of offices on each side; door centers are distances along each run.
pub fn office_plan() -> Vec<WallSpec> {
    let mut walls = vec![
        // Corridor, south side (60 m run), doors into three south offices.
        WallSpec::with_doors(
            Vec2::new(-30.0, -6.0),
            Vec2::new(30.0, -6.0),
            vec![10.0, 30.0, 50.0],
        ),
        // Corridor, north side, doors into two north offices.
        WallSpec::with_doors(
            Vec2::new(-30.0, 6.0),
            Vec2::new(30.0, 6.0),
            vec![15.0, 45.0],
        ),
        // Corridor end caps with a door each.
        WallSpec::with_doors(Vec2::new(-30.0, -6.0), Vec2::new(-30.0, 6.0), vec![6.0]),
        WallSpec::with_doors(Vec2::new(30.0, -6.0), Vec2::new(30.0, 6.0), vec![6.0]),
    ];
    // South office partitions.
    for x in [-10.0f32, 10.0] {
        walls.push(WallSpec::solid(Vec2::new(x, -20.0), Vec2::new(x, -6.0)));
    }
    walls.push(WallSpec::solid(Vec2::new(-30.0, -20.0), Vec2::new(30.0, -20.0)));
    // North office partition and back wall.
    walls.push(WallSpec::solid(Vec2::new(0.0, 6.0), Vec2::new(0.0, 18.0)));
    walls.push(WallSpec::solid(Vec2::new(-30.0, 18.0), Vec2::new(30.0, 18.0)));
    walls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_wall_yields_one_full_segment() {
        let specs = [WallSpec::solid(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0))];
        let segments = build_wall_segments(&specs);
        assert_eq!(segments.len(), 1);
        let s = &segments[0];
        assert!((s.length - 10.0).abs() < 1e-5);
        assert!((s.height - ROOM_HEIGHT).abs() < 1e-5);
        assert!((s.center.x - 5.0).abs() < 1e-5);
        assert!((s.center.y - ROOM_HEIGHT / 2.0).abs() < 1e-5);
    }

    #[test]
    fn door_splits_wall_and_adds_lintel() {
        let specs = [WallSpec::with_doors(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            vec![5.0],
        )];
        let segments = build_wall_segments(&specs);
        // Left piece, lintel, right piece.
        assert_eq!(segments.len(), 3);
        let lintel = segments
            .iter()
            .find(|s| s.height < ROOM_HEIGHT - 0.1)
            .unwrap();
        assert!((lintel.height - (ROOM_HEIGHT - DOOR_TARGET_HEIGHT)).abs() < 1e-5);
        assert!(lintel.center.y > DOOR_TARGET_HEIGHT);
        // The opening is leaf width plus clearance.
        assert!((lintel.length - (DOOR_WIDTH + DOOR_OPENING_CLEARANCE)).abs() < 1e-5);
    }

    #[test]
    fn too_short_walls_are_dropped() {
        let specs = [WallSpec::solid(Vec2::new(0.0, 0.0), Vec2::new(0.2, 0.0))];
        assert!(build_wall_segments(&specs).is_empty());
        assert!(build_door_placements(&specs).is_empty());
    }

    #[test]
    fn placement_normal_is_unit_perpendicular() {
        let specs = [WallSpec::with_doors(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            vec![5.0],
        )];
        let placements = build_door_placements(&specs);
        assert_eq!(placements.len(), 1);
        let p = &placements[0];
        assert!((p.normal.length() - 1.0).abs() < 1e-5);
        // Run direction is +Z; normal is perpendicular to it.
        assert!(p.normal.dot(Vec2::new(0.0, 1.0)).abs() < 1e-5);
        assert!((p.position - Vec2::new(0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn door_centers_clamp_inside_the_run() {
        let specs = [WallSpec::with_doors(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            vec![0.0, 10.0],
        )];
        let placements = build_door_placements(&specs);
        let half_width = resolve_door_width(&specs[0]) / 2.0;
        for p in &placements {
            assert!(p.position.x >= half_width - 1e-5);
            assert!(p.position.x <= 10.0 - half_width + 1e-5);
        }
    }

    #[test]
    fn office_plan_fits_the_room_and_door_budget() {
        let walls = office_plan();
        let half = ROOM_SIZE / 2.0;
        for wall in &walls {
            for p in [wall.start, wall.end] {
                assert!(p.x.abs() <= half && p.y.abs() <= half);
            }
        }
        let doors = build_door_placements(&walls);
        assert!(!doors.is_empty());
        assert!(doors.len() <= MAX_ACTIVE_DOORS);
    }

    #[test]
    fn yaw_matches_rotation_convention() {
        // A run along +Z must rotate local +X onto +Z under glam's Y rotation.
        let specs = [WallSpec::solid(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0))];
        let segments = build_wall_segments(&specs);
        let rotated = glam::Mat4::from_rotation_y(segments[0].yaw)
            .transform_vector3(glam::Vec3::X);
        assert!((rotated - glam::Vec3::Z).length() < 1e-5);
    }
}
