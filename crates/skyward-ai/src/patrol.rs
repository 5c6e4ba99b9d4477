//! Patrol route generation.

use rand::Rng;

use skyward_core::enums::PatrolPattern;
use skyward_core::types::Vec3;

/// Build a patrol route for the given pattern, centered on `center`.
/// Routes are closed loops; callers wrap the waypoint index.
pub fn build_route(
    pattern: PatrolPattern,
    center: Vec3,
    radius: f64,
    rng: &mut impl Rng,
) -> Vec<Vec3> {
    match pattern {
        PatrolPattern::Circle => circle(center, radius),
        PatrolPattern::FigureEight => figure_eight(center, radius),
        PatrolPattern::Linear => linear(center, radius),
        PatrolPattern::Random => random_box(center, radius, rng),
    }
}

fn circle(center: Vec3, radius: f64) -> Vec<Vec3> {
    (0..8)
        .map(|i| {
            let angle = i as f64 / 8.0 * std::f64::consts::TAU;
            Vec3::new(
                center.x + angle.cos() * radius,
                center.y,
                center.z + angle.sin() * radius,
            )
        })
        .collect()
}

/// Lemniscate: x sweeps a full circle while z oscillates at double
/// frequency, crossing the center twice per loop.
fn figure_eight(center: Vec3, radius: f64) -> Vec<Vec3> {
    (0..16)
        .map(|i| {
            let t = i as f64 / 16.0 * std::f64::consts::TAU;
            Vec3::new(
                center.x + t.sin() * radius,
                center.y,
                center.z + (t * 2.0).sin() * radius * 0.5,
            )
        })
        .collect()
}

fn linear(center: Vec3, radius: f64) -> Vec<Vec3> {
    vec![
        Vec3::new(center.x - radius, center.y, center.z),
        Vec3::new(center.x + radius, center.y, center.z),
    ]
}

fn random_box(center: Vec3, radius: f64, rng: &mut impl Rng) -> Vec<Vec3> {
    (0..5)
        .map(|_| {
            Vec3::new(
                center.x + (rng.gen::<f64>() - 0.5) * 2.0 * radius,
                center.y + (rng.gen::<f64>() - 0.5) * 20.0,
                center.z + (rng.gen::<f64>() - 0.5) * 2.0 * radius,
            )
        })
        .collect()
}
