/*

    Run box mask augmentation on all-ones volumes and
    report what the mask did to them.

    Usage: boxaug [job.json]

    @date: Nov, 2025
    @author: Bartu

*/

use std::{self, env, time::Instant};

use ndarray::{ArrayD, IxDyn};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{info, warn, error, debug};
use tracing_subscriber;

use box_augment::augment::{Augment, SampleSet};
use box_augment::box_mask::BoxMaskAugmenter;
use box_augment::json_parser::parse_job_json;
use box_augment::json_structs::BoxJob;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console
    tracing_subscriber::fmt::init();

    // Parse args
    let args: Vec<String> = env::args().collect();
    let job = if args.len() == 1 {
        warn!("No arguments were provided, running the built-in demo job...");
        BoxJob::demo()
    } else if args.len() == 2 {
        info!("Loading job from {}...", args[1]);
        parse_job_json(&args[1]).map_err(|e| {
            error!("Failed to load job: {}", e);
            e
        })?
    } else {
        error!("Usage: {} <filename>.json", args[0]);
        std::process::exit(1);
    };
    debug!("Job is loaded.\n {:#?}", job);

    let mut rng = match job.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let spec = job.volume_set();
    let imgs = job.keys();
    let mut aug = BoxMaskAugmenter::new(job.box_mask);

    let start = Instant::now();
    aug.prepare(&spec, &imgs, &mut rng)?;
    info!("Prepared {} in {:?}", aug.name(), start.elapsed());

    if let (Some(mask), Some(stats)) = (aug.mask(), aug.stats()) {
        let lowest = mask.iter().copied().fold(1.0, f32::min);
        info!(
            "Mask {:?}: {} boxes, {} / {:.0} voxels toward goal, min {:.4}, mean {:.4}",
            mask.shape(),
            stats.boxes,
            stats.covered,
            stats.goal,
            lowest,
            mask.mean().unwrap_or(1.0)
        );
    }

    let sample: SampleSet = spec
        .iter()
        .map(|(k, shape)| (k.clone(), ArrayD::ones(IxDyn(shape))))
        .collect();
    let sample = aug.augment(sample, &imgs)?;

    for key in imgs.iter() {
        let mean = sample[key].mean().unwrap_or(0.0);
        info!("Volume '{}' {:?} mean after dimming: {:.4}", key, sample[key].shape(), mean);
    }

    info!("Finished execution.");
    Ok(())
}
