/*

    Box mask augmentation.

    Overlays randomly placed, randomly dimmed boxes onto
    3D volumes to simulate occlusions (e.g. imaging artifacts).

    prepare() builds one mask over the union of all volume
    boxes (each centered at the origin), dimming random boxes
    until their summed volume passes density * region volume.
    augment() multiplies each volume by its crop of that mask.

    Overlapping boxes compound multiplicatively, and their
    volumes are counted twice toward the goal, so the distinct
    covered area may fall short of density.

    @date: 12 Nov, 2025
    @author: Bartu
*/

use std::collections::HashMap;

use ndarray::{Array3, ArrayView3, s};
use rand::RngCore;

use crate::augment::{Augment, KeySet, SampleSet, VolumeSet};
use crate::bbox::{BBox, merge_all};
use crate::prelude::*;
use crate::sampler::{margin_intervals, random_alpha, random_edge_lengths, random_location};

#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct BoxMaskConfig {
    /// Smallest box edge, also the margin kept from the region border
    #[default = 30]
    #[serde(deserialize_with = "deser_int")]
    pub min_dim: Int,

    #[default = 80]
    #[serde(deserialize_with = "deser_int")]
    pub max_dim: Int,

    /// Divides the Z edge of every box
    #[default = 10]
    #[serde(deserialize_with = "deser_int")]
    pub aspect_ratio: Int,

    #[default = 0.2]
    #[serde(deserialize_with = "deser_float")]
    pub density: Float,

    /// Upper bound of the per-box dimming factor
    #[default = 0.5]
    #[serde(deserialize_with = "deser_float")]
    pub alpha: Float,
}

impl BoxMaskConfig {
    pub fn validate(&self) -> AugmentResult<()> {
        let fail = |msg: String| Err(AugmentError::InvalidConfiguration(msg));

        if self.min_dim < 1 {
            return fail(format!("min_dim must be positive, found {}", self.min_dim));
        }
        if self.max_dim < self.min_dim {
            return fail(format!("max_dim {} is smaller than min_dim {}", self.max_dim, self.min_dim));
        }
        if self.aspect_ratio < 1 || self.min_dim / self.aspect_ratio < 1 {
            return fail(format!(
                "aspect_ratio {} would flatten boxes of min_dim {} to zero thickness",
                self.aspect_ratio, self.min_dim
            ));
        }
        if !self.density.is_finite() || self.density < 0.0 {
            return fail(format!("density must be a non-negative number, found {}", self.density));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return fail(format!("alpha must lie in (0, 1], found {}", self.alpha));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaskStats {
    /// Number of random boxes applied
    pub boxes: usize,
    /// Summed clipped box volume, overlaps counted again
    pub covered: i64,
    pub goal: f64,
    pub region_volume: i64,
}

// Valid only for the sample it was prepared with
#[derive(Debug, Clone)]
struct PreparedMask {
    offset: Coord,
    dim: Coord,
    mask: Array3<Float>,
    boxes: HashMap<String, BBox>,
    stats: MaskStats,
}

impl PreparedMask {
    fn crop(&self, local: &BBox) -> ArrayView3<'_, Float> {
        let [z, y, x] = local.axes();
        self.mask.slice(s![z.to_range(), y.to_range(), x.to_range()])
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoxMaskAugmenter {
    pub config: BoxMaskConfig,
    state: Option<PreparedMask>,
}

impl BoxMaskAugmenter {
    pub fn new(config: BoxMaskConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.state.is_some()
    }

    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Minimum corner of the bounding region
    pub fn offset(&self) -> Option<Coord> {
        self.state.as_ref().map(|st| st.offset)
    }

    /// Size of the bounding region, equal to the mask shape
    pub fn dim(&self) -> Option<Coord> {
        self.state.as_ref().map(|st| st.dim)
    }

    pub fn mask(&self) -> Option<&Array3<Float>> {
        self.state.as_ref().map(|st| &st.mask)
    }

    pub fn stats(&self) -> Option<MaskStats> {
        self.state.as_ref().map(|st| st.stats)
    }

    /// Box of the volume in the bounding region's frame
    pub fn key_box(&self, key: &str) -> Option<BBox> {
        self.state.as_ref()?.boxes.get(key).copied()
    }

    /// Box of the volume in mask-local coordinates
    pub fn local_box(&self, key: &str) -> Option<BBox> {
        let st = self.state.as_ref()?;
        st.boxes.get(key).map(|b| b.translate(-st.offset))
    }

    fn build(&self, spec: &VolumeSet, imgs: &KeySet, rng: &mut dyn RngCore) -> AugmentResult<PreparedMask> {
        self.config.validate()?;

        // Union of all volume boxes, centered at the origin
        let mut boxes = HashMap::with_capacity(imgs.len());
        for key in imgs {
            let shape = spec
                .get(key)
                .ok_or_else(|| AugmentError::UnknownVolume(key.clone()))?;
            if shape.len() < SPATIAL_DIMS {
                return Err(AugmentError::ShapeMismatch {
                    key: key.clone(),
                    expected: vec![0; SPATIAL_DIMS],
                    found: shape.clone(),
                });
            }
            let size = spatial_size(shape).ok_or_else(|| {
                AugmentError::InvalidConfiguration(format!(
                    "volume '{key}' has shape {shape:?}, spatial dimensions must fit in {} bits",
                    Int::BITS
                ))
            })?;
            boxes.insert(key.clone(), BBox::centered(Coord::ZERO, size));
        }
        let region = merge_all(boxes.values())
            .ok_or_else(|| AugmentError::InvalidConfiguration("no volumes to mask".to_string()))?;

        let offset = region.min();
        let dim = region.size();
        let ranges = margin_intervals(dim, self.config.min_dim)?;

        let mut mask = Array3::<Float>::ones(to_usize3(dim));
        let mut stats = MaskStats {
            region_volume: region.volume(),
            goal: region.volume() as f64 * self.config.density as f64,
            ..Default::default()
        };
        debug!("Bounding region {} with offset {}, coverage goal {:.1}", region, offset, stats.goal);

        loop {
            let loc = random_location(rng, &ranges) + offset;
            let size = random_edge_lengths(rng, self.config.min_dim, self.config.max_dim, self.config.aspect_ratio);
            let alpha = random_alpha(rng, self.config.alpha);

            let local = region.intersect(&BBox::centered(loc, size)).translate(-offset);
            let [z, y, x] = local.axes();
            let mut view = mask.slice_mut(s![z.to_range(), y.to_range(), x.to_range()]);
            view *= alpha;

            stats.boxes += 1;
            stats.covered += local.volume();
            if stats.covered as f64 > stats.goal {
                break;
            }
        }
        debug!("Applied {} boxes covering {} voxels", stats.boxes, stats.covered);

        Ok(PreparedMask {
            offset,
            dim,
            mask,
            boxes,
            stats,
        })
    }
}

impl Augment for BoxMaskAugmenter {

    fn name(&self) -> &str {
        "box mask"
    }

    fn prepare(&mut self, spec: &VolumeSet, imgs: &KeySet, rng: &mut dyn RngCore) -> AugmentResult<VolumeSet> {
        let span = tracing::span!(tracing::Level::DEBUG, "box_mask_prepare");
        let _enter = span.enter();

        self.state = None;
        let prepared = self.build(spec, imgs, rng).map_err(|e| {
            error!("Box mask preparation failed: {}", e);
            e
        })?;
        self.state = Some(prepared);

        // No change in spec
        Ok(spec.clone())
    }

    fn augment(&self, mut sample: SampleSet, imgs: &KeySet) -> AugmentResult<SampleSet> {
        let st = self.state.as_ref().ok_or(AugmentError::Unprepared)?;

        for key in imgs {
            let local = st
                .boxes
                .get(key)
                .ok_or_else(|| AugmentError::UnknownKey(key.clone()))?
                .translate(-st.offset);
            let data = sample
                .get_mut(key)
                .ok_or_else(|| AugmentError::MissingSample(key.clone()))?;

            if spatial_size(data.shape()) != Some(local.size()) {
                return Err(AugmentError::ShapeMismatch {
                    key: key.clone(),
                    expected: to_usize3(local.size()).to_vec(),
                    found: data.shape().to_vec(),
                });
            }

            // Broadcasts over leading channel dims
            *data *= &st.crop(&local);
        }

        Ok(sample)
    }
}
