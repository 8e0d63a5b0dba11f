use super::Publisher;
use crate::{transform::HandCoords, Result};
use std::io::Write;

/// Writes each frame as one JSON array of 22 numbers per line
pub struct JsonLinesPublisher<W: Write + Send> {
    writer: W,
}

impl JsonLinesPublisher<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonLinesPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Publisher for JsonLinesPublisher<W> {
    fn publish(&mut self, coords: &HandCoords) -> Result<()> {
        serde_json::to_writer(&mut self.writer, coords)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "JsonLinesPublisher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::SMatrix;

    #[test]
    fn test_one_flat_array_per_line() {
        let mut publisher = JsonLinesPublisher::new(Vec::new());
        let coords = HandCoords::from_matrix(SMatrix::from_fn(|row, col| (row * 2 + col) as f64));
        publisher.publish(&coords).unwrap();
        publisher.publish(&HandCoords::zeros()).unwrap();

        let output = String::from_utf8(publisher.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let values: Vec<f64> = serde_json::from_str(lines[0]).unwrap();
        let expected: Vec<f64> = (0..22).map(f64::from).collect();
        assert_eq!(values, expected);
    }
}
