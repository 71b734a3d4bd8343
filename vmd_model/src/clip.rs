//! Animation clip artifacts and the sinks that persist them.
use std::{
    io::BufWriter,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Serialize;

use crate::animation::{CurveChannel, FRAME_RATE};
use crate::error::SaveClipError;

/// An offline animation artifact holding named float curves.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Clip {
    pub name: String,
    pub frame_rate: f32,
    pub curves: IndexMap<String, CurveChannel>,
}

impl Clip {
    pub fn new(name: impl Into<String>, curves: IndexMap<String, CurveChannel>) -> Self {
        Self {
            name: name.into(),
            frame_rate: FRAME_RATE,
            curves,
        }
    }
}

/// Destination for finished clips.
///
/// Stands in for the host asset database, which owns creating, replacing,
/// and deleting assets at a path.
pub trait ClipSink {
    fn write(&mut self, clip: &Clip, path: &Path) -> Result<(), SaveClipError>;
    fn exists(&self, path: &Path) -> bool;
    fn delete(&mut self, path: &Path) -> Result<(), SaveClipError>;
}

/// Persists clips as pretty printed JSON next to their source files.
#[derive(Debug, Default)]
pub struct JsonFileSink;

impl ClipSink for JsonFileSink {
    fn write(&mut self, clip: &Clip, path: &Path) -> Result<(), SaveClipError> {
        let writer = BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(writer, clip)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn delete(&mut self, path: &Path) -> Result<(), SaveClipError> {
        std::fs::remove_file(path)?;
        Ok(())
    }
}

/// `dance.vmd` -> `dance.anim`.
pub fn camera_clip_path(input: &Path) -> PathBuf {
    input.with_extension("anim")
}

/// `dance.vmd` + `Face` -> `dance - Face.anim` in the source folder.
pub fn morph_clip_path(input: &Path, mesh_name: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    input.with_file_name(format!("{stem} - {mesh_name}.anim"))
}

#[cfg(test)]
mod tests {
    use crate::animation::Keyframe;

    use super::*;

    #[test]
    fn clip_paths_derive_from_input() {
        assert_eq!(
            PathBuf::from("motions/dance.anim"),
            camera_clip_path("motions/dance.vmd".as_ref())
        );
        assert_eq!(
            PathBuf::from("motions/dance - Face.anim"),
            morph_clip_path("motions/dance.vmd".as_ref(), "Face")
        );
    }

    #[test]
    fn clip_serializes_curves_in_order() {
        let clip = Clip::new(
            "dance",
            IndexMap::from_iter([(
                "field of view".to_string(),
                CurveChannel {
                    keyframes: vec![Keyframe {
                        time: 0.0,
                        value: 30.0,
                        out_tangent: None,
                    }],
                },
            )]),
        );

        assert_eq!(
            r#"{"name":"dance","frame_rate":30.0,"curves":{"field of view":{"keyframes":[{"time":0.0,"value":30.0}]}}}"#,
            serde_json::to_string(&clip).unwrap()
        );
    }

    #[test]
    fn tangent_metadata_serializes_when_present() {
        let keyframe = Keyframe {
            time: 0.0,
            value: 1.0,
            out_tangent: Some(-1.0),
        };

        assert_eq!(
            r#"{"time":0.0,"value":1.0,"out_tangent":-1.0}"#,
            serde_json::to_string(&keyframe).unwrap()
        );
    }
}
