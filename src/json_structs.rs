/*

    Declare data structs needed to parse job JSON.

    - BoxJob: augmenter config, optional seed and the
      declared volume shapes to run on.

    @date: 13 Oct, 2025
    @author: Bartu
*/

use std::collections::BTreeMap;

use serde::Deserialize;
use smart_default::SmartDefault;

use crate::augment::{KeySet, VolumeSet};
use crate::box_mask::BoxMaskConfig;
use crate::json_parser::{deser_opt_u64, deser_shape_map};
use crate::numeric::Shape;

#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct BoxJob {
    pub box_mask: BoxMaskConfig,

    #[serde(deserialize_with = "deser_opt_u64")]
    pub seed: Option<u64>,

    #[serde(deserialize_with = "deser_shape_map")]
    pub volumes: BTreeMap<String, Shape>,
}

impl BoxJob {
    /// Job used when no file is given
    pub fn demo() -> Self {
        let mut volumes = BTreeMap::new();
        volumes.insert("input".to_string(), vec![1, 100, 100, 100]);
        volumes.insert("label".to_string(), vec![1, 80, 80, 80]);
        Self {
            box_mask: BoxMaskConfig::default(),
            seed: Some(0),
            volumes,
        }
    }

    pub fn volume_set(&self) -> VolumeSet {
        self.volumes.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub fn keys(&self) -> KeySet {
        self.volumes.keys().cloned().collect()
    }
}
