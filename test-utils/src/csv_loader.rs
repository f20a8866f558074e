use std::error::Error;
use std::path::{Path, PathBuf};

use csv::Reader;

/// Columns of a recorded three-axis trace: `timestamp,x,y,z`.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceColumn {
    Timestamp,
    X,
    Y,
    Z,
}

impl From<TraceColumn> for usize {
    fn from(value: TraceColumn) -> Self {
        value as usize
    }
}

impl TryFrom<usize> for TraceColumn {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TraceColumn::Timestamp),
            1 => Ok(TraceColumn::X),
            2 => Ok(TraceColumn::Y),
            3 => Ok(TraceColumn::Z),
            _ => Err(format!("No trace column at index {}", value)),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CsvColumnMapper {
    columns: Vec<usize>,
}

impl CsvColumnMapper {
    pub fn new() -> Self {
        Self { columns: vec![] }
    }

    pub fn columns(&self) -> Vec<usize> {
        self.columns.clone()
    }

    pub fn add_timestamp(&mut self) -> &mut Self {
        self.columns.push(TraceColumn::Timestamp.into());
        self
    }

    pub fn add_xyz(&mut self) -> &mut Self {
        self.columns.push(TraceColumn::X.into());
        self.columns.push(TraceColumn::Y.into());
        self.columns.push(TraceColumn::Z.into());
        self
    }
}

/// Absolute path of a file in this crate's `test_data` directory.
pub fn test_data_path(file_name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(file_name)
}

pub fn load_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: Vec<f64> = record
            .iter()
            .filter_map(|s| s.trim().parse::<f64>().ok())
            .collect();
        data.push(row);
    }

    Ok(data)
}

pub fn load_csv_columns<T: TryFrom<Vec<f64>>, P: AsRef<Path>>(
    file_path: P,
    columns: &[usize],
) -> Result<Vec<T>, Box<dyn Error>> {
    if columns.is_empty() {
        return Err("No columns provided".into());
    }

    let data = load_csv(file_path)?;

    let result = data
        .into_iter()
        .map(|rows| {
            columns
                .iter()
                .map(|&i| {
                    rows.get(i)
                        .ok_or_else(|| format!("Column index {} out of bounds", i).into())
                        .copied()
                })
                .collect::<Result<Vec<f64>, Box<dyn Error>>>()
        })
        .collect::<Result<Vec<Vec<f64>>, Box<dyn Error>>>()?
        .into_iter()
        .map(|f64_values| {
            T::try_from(f64_values).map_err(|_| "Failed to convert to T".to_string().into())
        })
        .collect::<Result<Vec<T>, Box<dyn Error>>>()?;

    Ok(result)
}
