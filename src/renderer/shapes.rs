//! Shape generation for 2D primitives
//!
//! All positions are in arena pixels (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{PORTAL_HALF_SIZE, TOOTH_HALF_HEIGHT, TOOTH_HALF_WIDTH};
use crate::sim::{GameState, Mouth};

const CIRCLE_SEGMENTS: u32 = 32;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Generate vertices for a filled axis-aligned ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(center: Vec2, half: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let min = center - half;
    let max = center + half;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// A tooth: crown with a darker root notch
pub fn tooth(center: Vec2) -> Vec<Vertex> {
    let half = Vec2::new(TOOTH_HALF_WIDTH, TOOTH_HALF_HEIGHT);
    let mut vertices = rect(center, half, colors::TOOTH);
    let notch = Vec2::new(half.x * 0.25, half.y * 0.35);
    vertices.extend(rect(
        center + Vec2::new(0.0, half.y - notch.y),
        notch,
        colors::TOOTH_SHADE,
    ));
    vertices
}

/// The portal: filled disc with a bright rim
pub fn portal(center: Vec2) -> Vec<Vertex> {
    let mut vertices = circle(center, PORTAL_HALF_SIZE, colors::PORTAL, CIRCLE_SEGMENTS);
    vertices.extend(ring(
        center,
        PORTAL_HALF_SIZE * 0.8,
        PORTAL_HALF_SIZE,
        colors::PORTAL_RING,
        CIRCLE_SEGMENTS,
    ));
    vertices
}

/// The mouth: lips, dark inside, tongue
pub fn mouth(mouth: &Mouth) -> Vec<Vertex> {
    let half = Mouth::half_extents();
    let mut vertices = ellipse(mouth.pos, half, colors::LIPS, CIRCLE_SEGMENTS);
    vertices.extend(ellipse(
        mouth.pos,
        half * Vec2::new(0.75, 0.55),
        colors::MOUTH_INSIDE,
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(ellipse(
        mouth.pos + Vec2::new(0.0, half.y * 0.25),
        half * Vec2::new(0.4, 0.25),
        colors::TONGUE,
        CIRCLE_SEGMENTS,
    ));
    vertices
}

/// Everything in the arena for this frame, back to front
pub fn frame_vertices(state: &GameState) -> Vec<Vertex> {
    let arena = Vec2::new(state.tuning.arena_width, state.tuning.arena_height);
    let mut vertices = rect(arena * 0.5, arena * 0.5, colors::BACKGROUND);

    if let Some(portal_entity) = state.portal().filter(|p| p.visible) {
        vertices.extend(portal(portal_entity.pos));
    }
    for t in state.registry.teeth() {
        vertices.extend(tooth(t.pos));
    }
    if let Some(m) = &state.mouth {
        vertices.extend(mouth(m));
    }

    vertices
}
