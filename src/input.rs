use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Probe values read from a file, with optional per-probe weights
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalData {
    pub values: Vec<f64>,
    pub weights: Option<Vec<f64>>,
}

impl SignalData {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read a signal file
///
/// See [`parse_signal`] for the accepted format.
pub fn read_signal_file<P: AsRef<Path>>(path: P) -> anyhow::Result<SignalData> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_signal(file).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse headerless delimited text, one probe per row
///
/// The first column holds the value and an optional second column the
/// weight. Weights are used only if every row has one. Lines starting with
/// `#` are comments; fields may carry surrounding whitespace.
pub fn parse_signal<R: Read>(reader: R) -> anyhow::Result<SignalData> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::new();
    let mut weights = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed row {}", row + 1))?;
        let Some(value) = record.get(0).filter(|field| !field.is_empty()) else {
            continue;
        };
        values.push(
            value
                .parse::<f64>()
                .with_context(|| format!("Invalid value {:?} on row {}", value, row + 1))?,
        );
        if let Some(weight) = record.get(1).filter(|field| !field.is_empty()) {
            let weight: f64 = weight
                .parse()
                .with_context(|| format!("Invalid weight {:?} on row {}", weight, row + 1))?;
            if weight.is_nan() || weight < 0.0 {
                anyhow::bail!("Weight {} on row {} must be non-negative", weight, row + 1);
            }
            weights.push(weight);
        }
    }

    if values.is_empty() {
        anyhow::bail!("No samples found");
    }

    let weights = if weights.len() == values.len() {
        Some(weights)
    } else {
        if !weights.is_empty() {
            log::warn!(
                "Ignoring weights: {} of {} rows have one",
                weights.len(),
                values.len()
            );
        }
        None
    };

    Ok(SignalData { values, weights })
}
