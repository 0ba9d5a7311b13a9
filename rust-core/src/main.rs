use anyhow::{Context, Result};
use boo_order::boo::{bonds_to_qlm, coarsegrain_qlm, ql, wl};
use boo_order::config::DEFAULT_DEGREE;
use boo_order::correlation::periodic_gg_l;
use boo_order::interfaces::Periodicity;
use boo_order::lattice::{cubic_lattice, cutoff_bonds, nearest_neighbor_distance, Centering};
use boo_order::spherical::is_supported_degree;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(name = "boo-order")]
#[command(about = "Bond-orientational order descriptors for 3D particle configurations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CrystalKind {
    Sc,
    Bcc,
    Fcc,
}

impl From<CrystalKind> for Centering {
    fn from(kind: CrystalKind) -> Self {
        match kind {
            CrystalKind::Sc => Centering::Primitive,
            CrystalKind::Bcc => Centering::BodyCentered,
            CrystalKind::Fcc => Centering::FaceCentered,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Mean ql, wl and coarse-grained Ql of a (possibly jittered) periodic cubic crystal
    Crystal {
        /// Crystal structure
        #[arg(long, value_enum, default_value = "fcc")]
        lattice: CrystalKind,

        /// Conventional cells per axis
        #[arg(short, long, default_value = "4")]
        cells: usize,

        /// Degree l of the harmonics
        #[arg(short = 'l', long, default_value_t = DEFAULT_DEGREE)]
        degree: usize,

        /// Uniform displacement amplitude, in units of the cell side
        #[arg(short, long, default_value = "0.0")]
        noise: f64,

        /// Bond cutoff as a multiple of the nearest neighbour distance
        #[arg(long, default_value = "1.1")]
        cutoff_factor: f64,

        /// Random seed for the displacements
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Raw g_l histogram of a uniform random gas in a periodic box, tab separated on stdout
    Correlate {
        /// Number of particles
        #[arg(short, long, default_value = "1000")]
        particles: usize,

        /// Side of the cubic box
        #[arg(short, long, default_value = "10.0")]
        box_side: f64,

        /// Number of distance bins over [0, box_side / 2)
        #[arg(long, default_value = "50")]
        bins: usize,

        /// Degree l of the harmonics
        #[arg(short = 'l', long, default_value_t = DEFAULT_DEGREE)]
        degree: usize,

        /// Bond cutoff distance
        #[arg(long, default_value = "1.2")]
        bond_cutoff: f64,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            warn!("Thread count {} specified but parallel feature not enabled. Ignoring.", threads);
        }
    }

    info!("Starting boo-order v{}", boo_order::VERSION);

    match cli.command {
        Commands::Crystal {
            lattice,
            cells,
            degree,
            noise,
            cutoff_factor,
            seed,
        } => run_crystal(lattice.into(), cells, degree, noise, cutoff_factor, seed),
        Commands::Correlate {
            particles,
            box_side,
            bins,
            degree,
            bond_cutoff,
            seed,
        } => run_correlate(particles, box_side, bins, degree, bond_cutoff, seed),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

fn run_crystal(
    centering: Centering,
    cells: usize,
    degree: usize,
    noise: f64,
    cutoff_factor: f64,
    seed: u64,
) -> Result<()> {
    let a = 1.0;
    let side = cells as f64 * a;
    let periodicity =
        Periodicity::cubic(side).context("The crystal needs at least one cell per axis")?;

    let mut positions = cubic_lattice(centering, cells, a);
    if noise > 0.0 {
        let mut rng = StdRng::seed_from_u64(seed);
        for p in positions.iter_mut() {
            *p += Vector3::from_fn(|_, _| rng.gen_range(-noise..noise) * a);
        }
    }
    let cutoff = cutoff_factor * nearest_neighbor_distance(centering, a);
    let bonds = cutoff_bonds(&positions, cutoff, &periodicity);
    info!(
        "{:?} crystal: {} particles, {} bonds below {:.4}",
        centering,
        positions.len(),
        bonds.len(),
        cutoff
    );

    let qlm = bonds_to_qlm(&positions, &bonds, degree, &periodicity)?;
    let (coarse, _) = coarsegrain_qlm(&qlm, &bonds, &vec![true; positions.len()])?;

    println!("l\t{}", degree);
    println!("mean_q\t{:.10}", mean(&ql(&qlm)));
    println!("mean_Q\t{:.10}", mean(&ql(&coarse)));
    if is_supported_degree(degree) {
        println!("mean_w\t{:.10}", mean(&wl(&qlm)?));
        println!("mean_W\t{:.10}", mean(&wl(&coarse)?));
    } else {
        warn!("wl is only tabulated for even l <= 10, skipping l = {}", degree);
    }
    Ok(())
}

fn run_correlate(
    particles: usize,
    box_side: f64,
    bins: usize,
    degree: usize,
    bond_cutoff: f64,
    seed: u64,
) -> Result<()> {
    let periodicity = Periodicity::cubic(box_side)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let positions: Vec<Vector3<f64>> = (0..particles)
        .map(|_| Vector3::from_fn(|_, _| rng.gen_range(0.0..box_side)))
        .collect();

    let bonds = cutoff_bonds(&positions, bond_cutoff, &periodicity);
    let qlm = bonds_to_qlm(&positions, &bonds, degree, &periodicity)?;
    let (coarse, _) = coarsegrain_qlm(&qlm, &bonds, &vec![true; particles])?;
    let hist = periodic_gg_l(&positions, box_side, &qlm, &coarse, bins)?;
    info!("{} pairs binned into {} bins", hist.total_pairs(), bins);

    let q_sums = hist.channel(0);
    let coarse_sums = hist.channel(1);
    println!("r\tcount\tsum_q\tsum_Q");
    for (bin, r) in hist.bin_centers().iter().enumerate() {
        println!("{:.6}\t{}\t{:.10}\t{:.10}", r, hist.counts()[bin], q_sums[bin], coarse_sums[bin]);
    }
    Ok(())
}
