//! Quadwarp reconcile demo: drives the engine the way a crop editor would.
//!
//! Usage:
//! ```text
//! cargo run --example reconcile
//! RUST_LOG=quadwarp=debug cargo run --example reconcile   # solver traces
//! ```

use quadwarp::geometry::{CropRect, CropRegion, Quad};
use quadwarp::math::homogeneous::project;
use quadwarp::math::Point2;
use quadwarp::operations::inset::{InsetWedges, Reconcile};
use quadwarp::operations::transform::{QuadToQuad, SolveHomography};
use quadwarp::Result;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for quadwarp.
    // Override with RUST_LOG env var (e.g. RUST_LOG=quadwarp=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("quadwarp=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Plate of a 3:2 image cropped to its centre.
    let aspect = 1.5;
    let region = CropRegion::from_rect(&CropRect::new(0.1, 0.1, 0.8, 0.8));
    let reference = region.to_quad(aspect)?;
    println!("reference plate: {:?}", reference.corners());

    // The user drags the whole quad to the right and pulls one corner out.
    let mut working = reference;
    for i in 0..4 {
        let c = working.corner(i);
        working.set_corner(i, Point2::new(c.x + 0.2, c.y));
    }
    report("translated", &reference, &working);

    let rb = *working.right_bottom();
    working.set_corner(3, Point2::new(rb.x + 0.3, rb.y - 0.1));
    report("corner dragged", &reference, &working);

    // Rendering matrix from the reference plate to the edited quad.
    let matrix = QuadToQuad::new(reference, working).execute()?;
    println!("rendering matrix:\n{matrix}");

    // Same map from raw correspondences.
    let h = SolveHomography::from_quads(&reference, &working).execute()?;
    for corner in reference.corners() {
        if let Some(mapped) = project(&h, corner) {
            println!("  {corner} -> {mapped}");
        }
    }

    // A degenerate request is reported, not rendered.
    let collapsed = Quad::new(
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(2.0, 0.0),
        Point2::new(0.0, 1.0),
    );
    if let Err(err) = SolveHomography::from_quads(&collapsed, &working).execute() {
        println!("collinear correspondences rejected: {err}");
    }

    Ok(())
}

fn report(label: &str, reference: &Quad, working: &Quad) {
    let reconcile = Reconcile::new(*reference, *working);
    let displacements = reconcile.displacements();
    let wedges = InsetWedges::new(*reference, *working).execute();
    println!(
        "{label}: offset {:?} via {:?} ({} displacements, {} inset wedges)",
        reconcile.execute(),
        displacements.strategy,
        displacements.vectors.len(),
        wedges.len(),
    );
}
