use std::{
    fs::{create_dir_all, File},
    io::BufWriter,
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::{floating_type_mod::FT, CollisionSimulation, Particle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: FT,
    pub step: usize,
    pub particles: Vec<Particle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub name: String,
    pub time: FT,
    pub step: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    pub files: Vec<SeriesEntry>,
}

pub(crate) struct SnapshotExporter {
    /// something like './data/gas' which will get expanded to './data/gas-00001.yaml' and './data/gas.series.yaml'
    folder: PathBuf,
    basename: String,
    snapshot_number: usize,
    series: Series,
}

impl SnapshotExporter {
    pub(crate) fn new(folder: impl Into<PathBuf>, basename: impl Into<String>) -> Result<SnapshotExporter, AppError> {
        let folder: PathBuf = folder.into();
        let basename: String = basename.into();

        create_dir_all(&folder).map_err(AppError::io(&folder))?;

        Ok(SnapshotExporter {
            folder,
            basename,
            snapshot_number: 1,
            series: Series::default(),
        })
    }

    pub(crate) fn add_snapshot(&mut self, simulation: &CollisionSimulation) -> Result<(), AppError> {
        let filename = format!("{}-{:05}.yaml", self.basename, self.snapshot_number);

        let snapshot = Snapshot {
            time: simulation.time(),
            step: simulation.step_number(),
            particles: simulation.particles().to_vec(),
        };
        self.write_yaml(&filename, &snapshot, "snapshot")?;

        self.series.files.push(SeriesEntry {
            name: filename,
            time: snapshot.time,
            step: snapshot.step,
        });

        // index is rewritten every time so an aborted run still leaves a valid one
        let series_filename = format!("{}.series.yaml", self.basename);
        self.write_yaml(&series_filename, &self.series, "snapshot series")?;

        self.snapshot_number += 1;
        Ok(())
    }

    fn write_yaml<T: Serialize>(&self, filename: &str, value: &T, what: &'static str) -> Result<(), AppError> {
        let path = self.folder.join(filename);
        let file = File::create(&path).map_err(AppError::io(&path))?;
        serde_yaml::to_writer(BufWriter::new(file), value).map_err(|source| AppError::Serialize { what, source })
    }
}
