/*

    Declare the two-call contract every augmentation plugin
    follows, plus the typed records passed through it.

    The pipeline calls prepare() once per sample with the
    declared shapes, then augment() with the actual data.
    A plugin may keep state between the two calls, but only
    for the sample it was last prepared for.

    @date: 12 Nov, 2025
    @author: Bartu
*/

use std::collections::{BTreeSet, HashMap};

use ndarray::ArrayD;
use rand::RngCore;

use crate::error::AugmentResult;
use crate::numeric::{Float, Shape};

pub type VolumeSet = HashMap<String, Shape>;
pub type SampleSet = HashMap<String, ArrayD<Float>>;
pub type KeySet = BTreeSet<String>;

pub trait Augment {

    fn name(&self) -> &str {
        "unnamed augmenter"
    }

    /// Compute whatever the plugin needs from declared shapes.
    /// Returns the (possibly changed) volume spec.
    fn prepare(&mut self, spec: &VolumeSet, imgs: &KeySet, rng: &mut dyn RngCore) -> AugmentResult<VolumeSet>;

    /// Apply the prepared state to the sample. Arrays are
    /// modified in place and the same sample is handed back.
    fn augment(&self, sample: SampleSet, imgs: &KeySet) -> AugmentResult<SampleSet>;

    /// prepare() against the sample's own shapes, then augment()
    fn apply(&mut self, sample: SampleSet, imgs: &KeySet, rng: &mut dyn RngCore) -> AugmentResult<SampleSet> {
        let spec = volume_set_of(&sample);
        self.prepare(&spec, imgs, rng)?;
        self.augment(sample, imgs)
    }
}

pub fn volume_set_of(sample: &SampleSet) -> VolumeSet {
    sample
        .iter()
        .map(|(k, v)| (k.clone(), v.shape().to_vec()))
        .collect()
}

pub fn key_set<I, S>(keys: I) -> KeySet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    keys.into_iter().map(Into::into).collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_volume_set_of() {
        let mut sample = SampleSet::new();
        sample.insert("input".to_string(), ArrayD::zeros(IxDyn(&[1, 4, 5, 6])));
        sample.insert("label".to_string(), ArrayD::zeros(IxDyn(&[3, 4, 5])));
        let spec = volume_set_of(&sample);
        assert_eq!(spec["input"], vec![1, 4, 5, 6]);
        assert_eq!(spec["label"], vec![3, 4, 5]);
    }

    #[test]
    fn test_key_set() {
        let keys = key_set(["b", "a", "b"]);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.iter().next().map(String::as_str), Some("a"));
    }
}
