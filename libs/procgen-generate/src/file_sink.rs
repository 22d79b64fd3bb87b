//! # File Output Sink
//!
//! [`OutputSink`] used when the primary encoder writes files. Encoder files
//! land in the output directory, report entries are appended to a report
//! file at `end_model`, prints and errors go to `tracing`.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use config::constants::REPORT_FILE_NAME;
use procgen_engine::{OutputSink, SinkError};

#[derive(Debug)]
struct OpenModel {
    shape_index: usize,
    shape_name: String,
    report_lines: Vec<String>,
}

/// Writes encoder output below one directory.
#[derive(Debug)]
pub struct FileOutputSink {
    dir: PathBuf,
    report_file: String,
    first_shape: usize,
    current: Option<OpenModel>,
    written: Vec<PathBuf>,
}

impl FileOutputSink {
    /// Uses `dir` for output, creating it if absent.
    pub fn create(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            fs::create_dir_all(&dir)?;
            tracing::info!(dir = %dir.display(), "created output directory");
        }
        Ok(Self {
            dir,
            report_file: REPORT_FILE_NAME.to_string(),
            first_shape: 0,
            current: None,
            written: Vec::new(),
        })
    }

    /// Sets the file receiving report entries.
    pub fn with_report_file(mut self, name: impl Into<String>) -> Self {
        self.report_file = name.into();
        self
    }

    /// Batch index of the first shape of the next engine call. Models are
    /// numbered from it in the report file.
    pub fn set_first_shape(&mut self, index: usize) {
        self.first_shape = index;
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every file written so far, in order, without duplicates.
    pub fn files_written(&self) -> &[PathBuf] {
        &self.written
    }

    fn current(&mut self, callback: &'static str) -> Result<&mut OpenModel, SinkError> {
        self.current
            .as_mut()
            .ok_or(SinkError::NoOpenModel { callback })
    }

    /// Resolves `name` inside the output directory.
    fn target(&self, name: &str) -> Result<PathBuf, SinkError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.dir.join(name)),
            _ => Err(SinkError::InvalidFileName(name.to_string())),
        }
    }

    fn record(&mut self, path: PathBuf) {
        if !self.written.contains(&path) {
            self.written.push(path);
        }
    }
}

fn io_error(path: &Path, err: io::Error) -> SinkError {
    SinkError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

impl OutputSink for FileOutputSink {
    fn begin_model(&mut self, shape_index: usize, shape_name: &str) -> Result<(), SinkError> {
        if self.current.is_some() {
            return Err(SinkError::ModelAlreadyOpen);
        }
        self.current = Some(OpenModel {
            shape_index: self.first_shape + shape_index,
            shape_name: shape_name.to_string(),
            report_lines: Vec::new(),
        });
        Ok(())
    }

    fn emit_geometry(
        &mut self,
        _vertices: &[f64],
        _indices: &[u32],
        _face_counts: &[u32],
    ) -> Result<(), SinkError> {
        Err(SinkError::Unsupported {
            operation: "emit_geometry",
        })
    }

    fn emit_float_report(&mut self, key: &str, value: f64) -> Result<(), SinkError> {
        self.current("emit_float_report")?
            .report_lines
            .push(format!("{key}:float={value}"));
        Ok(())
    }

    fn emit_string_report(&mut self, key: &str, value: &str) -> Result<(), SinkError> {
        self.current("emit_string_report")?
            .report_lines
            .push(format!("{key}:string={value}"));
        Ok(())
    }

    fn emit_bool_report(&mut self, key: &str, value: bool) -> Result<(), SinkError> {
        self.current("emit_bool_report")?
            .report_lines
            .push(format!("{key}:bool={value}"));
        Ok(())
    }

    fn emit_print(&mut self, text: &str) -> Result<(), SinkError> {
        let model = self.current("emit_print")?;
        tracing::info!(
            target: "procgen::print",
            shape = %model.shape_name,
            "{}",
            text.trim_end()
        );
        Ok(())
    }

    fn emit_error(&mut self, message: &str) -> Result<(), SinkError> {
        let model = self.current("emit_error")?;
        tracing::warn!(
            target: "procgen::print",
            shape = %model.shape_name,
            "{message}"
        );
        Ok(())
    }

    fn end_model(&mut self) -> Result<(), SinkError> {
        let model = self.current.take().ok_or(SinkError::NoOpenModel {
            callback: "end_model",
        })?;
        if model.report_lines.is_empty() {
            return Ok(());
        }

        let path = self.target(&self.report_file)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| io_error(&path, e))?;
        let mut text = format!("[{}] {}\n", model.shape_index, model.shape_name);
        for line in &model.report_lines {
            text.push_str(line);
            text.push('\n');
        }
        file.write_all(text.as_bytes())
            .map_err(|e| io_error(&path, e))?;
        self.record(path);
        Ok(())
    }

    fn abort_model(&mut self) {
        if let Some(model) = self.current.take() {
            tracing::debug!(
                shape_index = model.shape_index,
                dropped_reports = model.report_lines.len(),
                "discarded unfinished model"
            );
        }
    }

    fn write_file(&mut self, name: &str, contents: &[u8]) -> Result<(), SinkError> {
        self.current("write_file")?;
        let path = self.target(name)?;
        fs::write(&path, contents).map_err(|e| io_error(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote encoder output");
        self.record(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_makes_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("output");
        let sink = FileOutputSink::create(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(sink.dir(), dir);
    }

    #[test]
    fn reports_are_appended_per_model() {
        let root = tempfile::tempdir().unwrap();
        let mut sink = FileOutputSink::create(root.path()).unwrap();

        for (index, area) in [(0, 1.0), (1, 2.5)] {
            sink.begin_model(index, "lot").unwrap();
            sink.emit_float_report("area", area).unwrap();
            sink.emit_bool_report("extruded", true).unwrap();
            sink.end_model().unwrap();
        }

        let text = fs::read_to_string(root.path().join(REPORT_FILE_NAME)).unwrap();
        assert_eq!(
            text,
            "[0] lot\narea:float=1\nextruded:bool=true\n[1] lot\narea:float=2.5\nextruded:bool=true\n"
        );
        assert_eq!(sink.files_written().len(), 1);
    }

    #[test]
    fn aborted_model_is_dropped_and_sink_reusable() {
        let root = tempfile::tempdir().unwrap();
        let mut sink = FileOutputSink::create(root.path()).unwrap();

        sink.begin_model(0, "lot_0").unwrap();
        sink.emit_float_report("area", 1.0).unwrap();
        sink.abort_model();
        assert_eq!(sink.end_model(), Err(SinkError::NoOpenModel { callback: "end_model" }));

        sink.set_first_shape(1);
        sink.begin_model(0, "lot_1").unwrap();
        sink.emit_float_report("area", 2.0).unwrap();
        sink.end_model().unwrap();

        let text = fs::read_to_string(root.path().join(REPORT_FILE_NAME)).unwrap();
        assert_eq!(text, "[1] lot_1\narea:float=2\n");
    }

    #[test]
    fn encoder_files_stay_inside_directory() {
        let root = tempfile::tempdir().unwrap();
        let mut sink = FileOutputSink::create(root.path()).unwrap();
        sink.begin_model(0, "lot").unwrap();

        sink.write_file("theModel_lot.obj", b"o lot\n").unwrap();
        assert!(root.path().join("theModel_lot.obj").is_file());

        for bad in ["../escape.obj", "/etc/passwd", "a/b.obj", "", ".."] {
            assert_eq!(
                sink.write_file(bad, b""),
                Err(SinkError::InvalidFileName(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn geometry_callbacks_are_unsupported() {
        let root = tempfile::tempdir().unwrap();
        let mut sink = FileOutputSink::create(root.path()).unwrap();
        sink.begin_model(0, "lot").unwrap();
        assert!(matches!(
            sink.emit_geometry(&[], &[], &[]),
            Err(SinkError::Unsupported { .. })
        ));
    }
}
