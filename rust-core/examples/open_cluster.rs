/// Walkthrough of a bond-orientational order analysis with open boundaries
///
/// A jittered bcc block is treated as if it were an experimental field of
/// view: particles near the edges have incomplete neighbourhoods, so they are
/// masked out of the coarse-graining and are not used as correlation centers.
use boo_order::boo::{bonds_to_qlm, coarsegrain_qlm, ql, wl};
use boo_order::correlation::{gg_l, Binning};
use boo_order::geometry::inside_mask;
use boo_order::interfaces::Periodicity;
use boo_order::lattice::{cubic_lattice, cutoff_bonds, nearest_neighbor_distance, Centering};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Bond-orientational order of an open bcc cluster ===\n");

    let mut rng = StdRng::seed_from_u64(7);
    let mut positions = cubic_lattice(Centering::BodyCentered, 8, 1.0);
    for p in positions.iter_mut() {
        *p += Vector3::from_fn(|_, _| rng.gen_range(-0.04..0.04));
    }
    let bond_length = 1.1 * nearest_neighbor_distance(Centering::BodyCentered, 1.0);
    let bonds = cutoff_bonds(&positions, bond_length, &Periodicity::None);
    println!(
        "1. {} particles, {} bonds shorter than {:.3}",
        positions.len(),
        bonds.len(),
        bond_length
    );

    // Particles close to the edge miss part of their first shell
    let inside = inside_mask(&positions, bond_length);
    let qlm = bonds_to_qlm(&positions, &bonds, 6, &Periodicity::None)?;
    let (coarse, valid) = coarsegrain_qlm(&qlm, &bonds, &inside)?;
    let n_valid = valid.iter().filter(|&&v| v).count();
    println!("2. {} particles keep a fully resolved second shell", n_valid);

    let q6 = ql(&qlm);
    let w6 = wl(&qlm)?;
    let big_q6 = ql(&coarse);
    let mean_over = |values: &[f64]| {
        let sum: f64 = values.iter().zip(&valid).filter(|&(_, &v)| v).map(|(x, _)| x).sum();
        sum / n_valid.max(1) as f64
    };
    println!(
        "   <q6> = {:.4}, <w6> = {:.5}, <Q6> = {:.4}\n",
        mean_over(&q6),
        mean_over(&w6),
        mean_over(&big_q6)
    );

    // Centers far enough from the edges for every pair within max_distance
    let binning = Binning::new(20, 2.5)?;
    let centers = inside_mask(&positions, binning.max_distance());
    let hist = gg_l(&positions, &qlm, &coarse, &centers, &binning)?;
    let n_centers = centers.iter().filter(|&&c| c).count();
    println!("3. g6(r) from {} centers ({} pairs)", n_centers, hist.total_pairs());
    println!("   {:>6} {:>8} {:>10} {:>10}", "r", "pairs", "<q.q>", "<Q.Q>");
    let (q_sums, coarse_sums) = (hist.channel(0), hist.channel(1));
    for (bin, r) in hist.bin_centers().iter().enumerate() {
        let count = hist.counts()[bin];
        if count == 0 {
            continue;
        }
        println!(
            "   {:>6.3} {:>8} {:>10.5} {:>10.5}",
            r,
            count,
            q_sums[bin] / count as f64,
            coarse_sums[bin] / count as f64
        );
    }
    Ok(())
}
