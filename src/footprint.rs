//! Robot outline polygon and its placement in the world.
//!
//! A footprint is validated once, when configuration is loaded; update passes
//! only ever rotate and translate it. Degenerate polygons (fewer than three
//! points, non-finite coordinates, collinear rings) are rejected here so the
//! rasterizer never sees them.

use glam::Vec2;

use crate::types::{LayerError, Pose2};

/// Fallback radius (meters) when neither a polygon nor a radius is configured.
pub const DEFAULT_ROBOT_RADIUS: f32 = 0.46;

/// Number of segments used to tessellate a circular footprint.
const CIRCLE_SEGMENTS: usize = 16;

/// Ordered polygon of 2D points in the robot's own frame, implicitly closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    points: Vec<Vec2>,
}

impl Footprint {
    /// Build a footprint from a point list, validating it.
    pub fn from_points(points: Vec<Vec2>) -> Result<Self, LayerError> {
        if points.len() < 3 {
            return Err(LayerError::InvalidFootprint(format!(
                "footprint needs at least 3 points, got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(LayerError::InvalidFootprint(
                "footprint contains a non-finite coordinate".to_string(),
            ));
        }
        if polygon_area_doubled(&points).abs() < 1e-6 {
            return Err(LayerError::InvalidFootprint(
                "footprint points are collinear".to_string(),
            ));
        }
        Ok(Self { points })
    }

    /// Parse a bracketed point list, e.g. `[[0.3, 0.2], [-0.3, 0.2], [-0.3, -0.2]]`.
    pub fn parse(spec: &str) -> Result<Self, LayerError> {
        let invalid = |detail: String| LayerError::InvalidFootprint(detail);

        let trimmed = spec.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| invalid(format!("expected a bracketed point list, got '{spec}'")))?;

        let mut points = Vec::new();
        let mut rest = inner;
        while let Some(start) = rest.find('[') {
            if !is_separator(&rest[..start]) {
                return Err(invalid(format!("unexpected text '{}'", &rest[..start])));
            }
            let end = rest[start..]
                .find(']')
                .map(|i| i + start)
                .ok_or_else(|| invalid("unbalanced brackets".to_string()))?;
            let pair = &rest[start + 1..end];
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| invalid(format!("expected 'x, y', got '{pair}'")))?;
            points.push(Vec2::new(parse_coord(x)?, parse_coord(y)?));
            rest = &rest[end + 1..];
        }
        if !is_separator(rest) {
            return Err(invalid(format!("unexpected trailing text '{rest}'")));
        }

        Self::from_points(points)
    }

    /// Circle of the given radius, approximated by a tessellated polygon.
    pub fn circle(radius: f32) -> Result<Self, LayerError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(LayerError::InvalidFootprint(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        Ok(Self {
            points: circle_points(radius),
        })
    }

    /// Axis-aligned box centered on the robot: `length` along x, `width` along y.
    pub fn rectangle(length: f32, width: f32) -> Result<Self, LayerError> {
        let half = Vec2::new(length, width) * 0.5;
        Self::from_points(vec![
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ])
    }

    /// Resolve a footprint from configuration: an explicit polygon string wins,
    /// otherwise a circle of `robot_radius`, otherwise the stock circle.
    ///
    /// Empty strings and `[]` count as unset, matching what hosts send when the
    /// polygon field is left blank.
    pub fn from_config(
        footprint: Option<&str>,
        robot_radius: Option<f32>,
    ) -> Result<Self, LayerError> {
        match footprint {
            Some(spec) if !spec.trim().is_empty() && spec.trim() != "[]" => Self::parse(spec),
            _ => Self::circle(robot_radius.unwrap_or(DEFAULT_ROBOT_RADIUS)),
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Rotate by the pose's yaw, then translate by its position.
    ///
    /// Point count and order are preserved; the result is expressed in the
    /// frame the pose is expressed in.
    pub fn transform(&self, pose: Pose2) -> Vec<Vec2> {
        let (sin, cos) = pose.yaw.sin_cos();
        self.points
            .iter()
            .map(|p| Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos) + pose.position)
            .collect()
    }
}

impl Default for Footprint {
    /// Stock circular footprint of [`DEFAULT_ROBOT_RADIUS`].
    fn default() -> Self {
        Self {
            points: circle_points(DEFAULT_ROBOT_RADIUS),
        }
    }
}

fn circle_points(radius: f32) -> Vec<Vec2> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / CIRCLE_SEGMENTS as f32;
            Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Twice the signed area of the polygon (shoelace formula).
fn polygon_area_doubled(points: &[Vec2]) -> f32 {
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}

fn parse_coord(s: &str) -> Result<f32, LayerError> {
    let s = s.trim();
    s.parse::<f32>()
        .map_err(|e| LayerError::InvalidFootprint(format!("bad coordinate '{s}': {e}")))
}

fn is_separator(s: &str) -> bool {
    s.chars().all(|c| c == ',' || c.is_whitespace())
}
