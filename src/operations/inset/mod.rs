mod reconcile;
mod wedges;

pub use reconcile::{Displacements, Reconcile, Strategy};
pub use wedges::InsetWedges;
