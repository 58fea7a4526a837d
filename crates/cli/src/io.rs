//! CSV trajectory I/O through polars.
//!
//! Input needs columns `x`, `y`, `t` (any numeric type; cast to f64). Output
//! carries the original index next to the kept coordinates.

use anyhow::{anyhow, Context, Result};
use dots::Point;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
            col("t").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y,t from {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "input_csv_shape");

    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let ts = df.column("t")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .zip(ts.into_iter())
        .enumerate()
        .map(|(row, ((x, y), t))| match (x, y, t) {
            (Some(x), Some(y), Some(t)) => Ok(Point::new(x, y, t)),
            _ => Err(anyhow!("row {row}: missing x, y or t")),
        })
        .collect()
}

/// Write `index,x,y,t` for the given original indices.
pub fn write_kept(path: &Path, points: &[Point], kept: &[usize]) -> Result<()> {
    let mut df = df!(
        "index" => kept.iter().map(|&i| i as u64).collect::<Vec<_>>(),
        "x" => kept.iter().map(|&i| points[i].x).collect::<Vec<_>>(),
        "y" => kept.iter().map(|&i| points[i].y).collect::<Vec<_>>(),
        "t" => kept.iter().map(|&i| points[i].t).collect::<Vec<_>>(),
    )?;
    write_csv(path, &mut df)
}

pub fn write_points(path: &Path, points: &[Point]) -> Result<()> {
    let mut df = df!(
        "x" => points.iter().map(|p| p.x).collect::<Vec<_>>(),
        "y" => points.iter().map(|p| p.y).collect::<Vec<_>>(),
        "t" => points.iter().map(|p| p.t).collect::<Vec<_>>(),
    )?;
    write_csv(path, &mut df)
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
