//! Traces a few hand-drawn territories and prints their outlines.
//!
//! Usage:
//! ```text
//! cargo run --example outline
//! RUST_LOG=claim_outline=trace cargo run --example outline
//! ```
//!
//! Map legend: one character per cell, `.` is unclaimed, any other character
//! is the owner.

use claim_outline::error::OverlayError;
use claim_outline::geometry::Polygon;
use claim_outline::math::Cell;
use claim_outline::operations::{
    AssembleAll, AssemblePolygons, Claim, GroupClaims, OutlineParams,
};
use claim_outline::overlay::{OverlaySink, OverlayState};

const MAP: &str = "\
aaa...bb
a.a...bb
aaa.....
....cc..
..c.c...
..ccc..a
";

/// Prints every overlay call instead of talking to a web map.
struct PrintSink;

impl OverlaySink for PrintSink {
    fn create(&mut self, id: &str, polygon: &Polygon) -> Result<(), OverlayError> {
        println!("create {id}: {}", describe(polygon));
        Ok(())
    }

    fn update(&mut self, id: &str, polygon: &Polygon) -> Result<(), OverlayError> {
        println!("update {id}: {}", describe(polygon));
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<(), OverlayError> {
        println!("remove {id}");
        Ok(())
    }
}

fn describe(polygon: &Polygon) -> String {
    let points: Vec<String> = polygon
        .vertices()
        .iter()
        .map(|p| format!("({}, {})", p.x, p.y))
        .collect();
    format!("{} vertices, area {} [{}]", polygon.len(), polygon.area(), points.join(" "))
}

fn parse(map: &str) -> Vec<Claim<char>> {
    let mut claims = Vec::new();
    for (z, line) in (0..).zip(map.lines()) {
        for (x, owner) in (0..).zip(line.chars()) {
            if owner != '.' {
                claims.push(Claim::new(owner, Cell::new(x, z)));
            }
        }
    }
    claims
}

fn main() -> claim_outline::Result<()> {
    // Default: WARN for everything, INFO for claim_outline.
    // Override with RUST_LOG env var (e.g. RUST_LOG=claim_outline=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("claim_outline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let groups = GroupClaims::new(parse(MAP)).execute();
    let sets = AssembleAll::new(&groups)
        .with_params(OutlineParams::default())
        .execute()?;

    let mut state = OverlayState::new();
    let mut sink = PrintSink;
    for (owner, set) in &sets {
        state.apply(&owner.to_string(), set, &mut sink)?;
    }

    // Owner `a` loses its far cell: one update, one removal.
    if let Some(group) = groups.iter().find(|group| group.owner == 'a') {
        let shrunk: Vec<Cell> = group
            .cells
            .iter()
            .copied()
            .filter(|cell| *cell != Cell::new(7, 5))
            .collect();
        let set = AssemblePolygons::new('a', &shrunk).execute()?;
        state.apply("a", &set, &mut sink)?;
    }

    Ok(())
}
