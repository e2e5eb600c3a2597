use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::Itertools;

use crate::{graph::WeightedEdge, heuristic::TourReport};

pub trait TourWriter {
    /// Human-readable report: MST edges and weight, the tour as `v0 -> v1 -> ... -> v0` and its
    /// weight
    fn try_write_tour<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;

    /// Pretty-printed JSON object with the fields of [`TourReport`]
    fn try_write_json<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;

    fn try_write_tour_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_tour(writer)
    }

    fn try_write_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_json(writer)
    }
}

impl TourWriter for TourReport {
    fn try_write_tour<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        writeln!(
            writer,
            "MST edges: {}",
            self.mst_edges
                .iter()
                .map(|WeightedEdge(u, v, w)| format!("{u}-{v} ({w})"))
                .join(", ")
        )?;
        writeln!(writer, "MST weight: {}", self.mst_weight)?;
        writeln!(writer, "Matching weight: {}", self.matching_weight)?;
        writeln!(writer, "Tour: {}", self.tour.iter().join(" -> "))?;
        writeln!(writer, "Total weight: {}", self.tour_weight)?;
        writer.flush()
    }

    fn try_write_json<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()
    }
}
