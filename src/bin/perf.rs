use log::{info, warn};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use redblack::RbTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "inserts", default_value = "0")]
    inserts: usize,

    #[structopt(long = "deletes", default_value = "0")]
    deletes: usize,

    #[structopt(long = "searches", default_value = "0")]
    searches: usize,

    #[structopt(long = "validate")]
    validate: bool,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let opts = Opt::from_args();
    TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let seed = opts.seed.unwrap_or_else(random);
    info!("perf seed:{}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: RbTree<u64> = RbTree::new();

    // initial load
    let start = time::Instant::now();
    let mut keys = Vec::with_capacity(opts.loads);
    for _i in 0..opts.loads {
        let key: u64 = rng.gen();
        index.insert(key);
        keys.push(key);
    }
    info!("loaded {} items in {:?}", opts.loads, start.elapsed());

    do_incremental(&mut rng, &opts, &mut index, &mut keys);

    let start = time::Instant::now();
    let n = index.iter().count();
    info!("iterating {} items, took {:?}", n, start.elapsed());

    if opts.validate {
        let start = time::Instant::now();
        match index.validate() {
            Ok(stats) => info!("validate {:?}, took {:?}", stats, start.elapsed()),
            Err(err) => warn!("validate failed, {}", err),
        }
    }
}

fn do_incremental(rng: &mut SmallRng, opts: &Opt, index: &mut RbTree<u64>, keys: &mut Vec<u64>) {
    let start = time::Instant::now();
    let total = opts.inserts + opts.deletes + opts.searches;
    let (mut n_missing, mut n) = (0, total);
    while n > 0 {
        let op = rng.gen::<usize>() % total;

        // pick existing keys most of the time, so that deletes and searches hit.
        let off = match keys.len() {
            0 => None,
            len => Some(rng.gen::<usize>() % len).filter(|_| rng.gen::<u8>() % 4 != 0),
        };
        let key = off.map(|off| keys[off]).unwrap_or_else(|| rng.gen());

        if op < opts.inserts {
            index.insert(key);
            keys.push(key);
        } else if op < (opts.inserts + opts.deletes) {
            match (index.delete(&key), off) {
                (Ok(_), Some(off)) => {
                    keys.swap_remove(off);
                }
                (Ok(_), None) => {
                    if let Some(off) = keys.iter().position(|k| *k == key) {
                        keys.swap_remove(off);
                    }
                }
                (Err(_), _) => n_missing += 1,
            }
        } else if index.search(&key).is_err() {
            n_missing += 1;
        }
        n -= 1;
    }
    info!(
        "incremental for operations {}, missing {}, took {:?}",
        total,
        n_missing,
        start.elapsed()
    );
}
