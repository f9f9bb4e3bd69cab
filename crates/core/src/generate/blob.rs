//! Organic SVG blobs
//!
//! Points are spread evenly around a circle, each pushed in by a seeded
//! random amount, and joined with a closed Catmull-Rom spline expressed as
//! cubic Béziers. The seed fully determines the shape.

use std::f64::consts::TAU;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::convert::color::parse_color;
use crate::draw::plan::{num, DrawPlan, Shape};
use crate::error::{Result, ToolError};
use crate::random::{RandomSource, SineRandom};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobOptions {
    pub size: u32,
    /// Number of control points, 3 to 20.
    pub points: u32,
    /// How far points may wander inward, 0 to 100 percent of the radius.
    pub randomness: u32,
    pub seed: u64,
    pub fill: String,
}

impl Default for BlobOptions {
    fn default() -> Self {
        Self {
            size: 400,
            points: 6,
            randomness: 40,
            seed: 1,
            fill: "#8b5cf6".to_string(),
        }
    }
}

pub fn blob_file_name(options: &BlobOptions) -> String {
    format!("blob-{}.svg", options.seed)
}

fn validate(options: &BlobOptions) -> Result<()> {
    if !(3..=20).contains(&options.points) {
        return Err(ToolError::invalid("Points must be between 3 and 20"));
    }
    if options.randomness > 100 {
        return Err(ToolError::invalid("Randomness must be between 0 and 100"));
    }
    if !(16..=4000).contains(&options.size) {
        return Err(ToolError::invalid("Size must be between 16 and 4000"));
    }
    Ok(())
}

/// The blob outline as SVG path data.
pub fn blob_path(options: &BlobOptions) -> Result<String> {
    validate(options)?;

    let mut rng = SineRandom::new(options.seed);
    let center = f64::from(options.size) / 2.0;
    let radius = center * 0.8;
    let wander = f64::from(options.randomness) / 100.0 * 0.5;
    let n = options.points as usize;

    let points: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            let r = radius * (1.0 - wander * rng.unit());
            (center + r * angle.cos(), center + r * angle.sin())
        })
        .collect();

    let mut d = String::new();
    let _ = write!(d, "M{},{}", num(points[0].0), num(points[0].1));
    for i in 0..n {
        let p0 = points[(i + n - 1) % n];
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p3 = points[(i + 2) % n];
        let c1 = (p1.0 + (p2.0 - p0.0) / 6.0, p1.1 + (p2.1 - p0.1) / 6.0);
        let c2 = (p2.0 - (p3.0 - p1.0) / 6.0, p2.1 - (p3.1 - p1.1) / 6.0);
        let _ = write!(
            d,
            "C{},{} {},{} {},{}",
            num(c1.0),
            num(c1.1),
            num(c2.0),
            num(c2.1),
            num(p2.0),
            num(p2.1)
        );
    }
    d.push('Z');
    Ok(d)
}

pub fn blob_plan(options: &BlobOptions) -> Result<DrawPlan> {
    let fill = parse_color(&options.fill)?.to_hex();
    let d = blob_path(options)?;
    let mut plan = DrawPlan::new(options.size, options.size);
    plan.push(Shape::Path { d, fill });
    Ok(plan)
}
