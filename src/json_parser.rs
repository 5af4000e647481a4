/*

    Provide utilities to parse augmentation job JSON files.

    The parser is somewhat robust, let <a> be integer or float type,
    in JSON file <a> can be given both in quotes (string) or as is.

    e.g. In JSON file both
    "MinDim": "30" and "MinDim": 30
    works as min_dim: Int in source code

    Shapes can be given as "1 100 100 100" or [1, 100, 100, 100].

    @date: 2 Oct, 2025
    @author: bartu
*/

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;

use serde::de;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::json_structs::BoxJob;
use crate::numeric::{Float, Int, Shape};

pub fn parse_job_json(path: &str) -> Result<BoxJob, Box<dyn std::error::Error>> {

    let span = tracing::span!(tracing::Level::INFO, "load_job");
    let _enter = span.enter();

    // Open file
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    debug!("Reading file from {}", path);

    let job: BoxJob = serde_json::from_reader(reader)?;
    Ok(job)
}

pub fn parse_job_str(s: &str) -> Result<BoxJob, serde_json::Error> {
    serde_json::from_str(s)
}

pub(crate) fn deser_int<'de, D>(deserializer: D) -> Result<Int, D::Error>
where
    D: Deserializer<'de>,
{
    /*
        Deserialize integer type given as either string or number in JSON
    */
    let s: Value = Deserialize::deserialize(deserializer)?;
    match s {
        Value::Number(n) => n.as_i64()
            .and_then(|v| Int::try_from(v).ok())
            .ok_or_else(|| de::Error::custom("Invalid integer")),
        Value::String(s) => s.trim().parse::<Int>()
            .map_err(|_| de::Error::custom("Failed to parse integer from string")),
        t => Err(de::Error::custom(format!("Expected int or string, found {t}"))),
    }
}

// Handles floats as string or number
pub(crate) fn deser_float<'de, D>(deserializer: D) -> Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Value = Deserialize::deserialize(deserializer)?;
    match s {
        Value::Number(n) => n.as_f64()
            .map(|v| v as Float)
            .ok_or_else(|| de::Error::custom("Invalid float")),
        Value::String(s) => s.trim().parse::<Float>()
            .map_err(|_| de::Error::custom("Failed to parse float from string")),
        t => Err(de::Error::custom(format!("Expected float or string, found {t}"))),
    }
}

pub(crate) fn deser_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<Value> = Option::deserialize(deserializer)?;
    match s {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_u64()
            .map(Some)
            .ok_or_else(|| de::Error::custom("Invalid seed")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<u64>()
            .map(Some)
            .map_err(|_| de::Error::custom("Failed to parse seed from string")),
        Some(t) => Err(de::Error::custom(format!("Expected seed as int or string, found {t}"))),
    }
}

fn value_to_dim(v: &Value) -> Result<usize, String> {
    match v {
        Value::Number(n) => n.as_u64()
            .map(|d| d as usize)
            .ok_or_else(|| format!("Invalid dimension {n}")),
        Value::String(s) => s.trim().parse::<usize>()
            .map_err(|_| format!("Failed to parse dimension '{s}'")),
        t => Err(format!("Expected dimension as int or string, found {t}")),
    }
}

pub(crate) fn parse_shape_value(v: &Value) -> Result<Shape, String> {
    match v {
        Value::String(s) => s
            .split_whitespace()
            .map(|tok| tok.parse::<usize>().map_err(|_| format!("Failed to parse dimension '{tok}'")))
            .collect(),
        Value::Array(items) => items.iter().map(value_to_dim).collect(),
        t => Err(format!("Expected shape as string or array, found {t}")),
    }
}

pub(crate) fn deser_shape_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Shape>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = Deserialize::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, v)| {
            parse_shape_value(&v)
                .map(|shape| (key.clone(), shape))
                .map_err(|e| de::Error::custom(format!("Volume '{key}': {e}")))
        })
        .collect()
}
