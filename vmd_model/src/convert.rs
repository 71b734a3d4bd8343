//! File level conversion entry points.
//!
//! These replace the original tool's editor menu handlers with explicit
//! parameters: an input path, the target meshes for morph conversion, and
//! an injected [ClipSink] for the produced artifacts.
use std::path::{Path, PathBuf};

use log::info;
use vmd_lib::vmd::Vmd;

use crate::TargetMesh;
use crate::animation::{camera_channels, mesh_morph_channels, morph_channels};
use crate::clip::{Clip, ClipSink, camera_clip_path, morph_clip_path};
use crate::error::{ConvertError, SaveClipError};

/// Convert the camera motion in `input` into a clip artifact written next
/// to the source file.
pub fn convert_camera<S: ClipSink>(input: &Path, sink: &mut S) -> Result<PathBuf, ConvertError> {
    check_extension(input)?;
    let vmd = Vmd::from_file(input)?;
    write_camera_clip(&vmd, input, sink)
}

/// Convert the morph motion in `input` into one clip artifact per target
/// mesh.
pub fn convert_morphs<S: ClipSink>(
    input: &Path,
    meshes: &[TargetMesh],
    sort_by_frame: bool,
    sink: &mut S,
) -> Result<Vec<PathBuf>, ConvertError> {
    check_extension(input)?;
    let vmd = Vmd::from_file(input)?;
    write_morph_clips(&vmd, input, meshes, sort_by_frame, sink)
}

/// Build the camera clip for an already decoded motion and persist it.
pub fn write_camera_clip<S: ClipSink>(
    vmd: &Vmd,
    input: &Path,
    sink: &mut S,
) -> Result<PathBuf, ConvertError> {
    let path = camera_clip_path(input);
    let clip = Clip::new(clip_name(&path), camera_channels(vmd));
    replace_clip(&clip, &path, sink)?;
    info!("saved camera clip to {path:?}");
    Ok(path)
}

/// Build and persist one morph clip per mesh for an already decoded
/// motion. Every mesh receives the full channel set, resolved against its
/// own blend shapes.
pub fn write_morph_clips<S: ClipSink>(
    vmd: &Vmd,
    input: &Path,
    meshes: &[TargetMesh],
    sort_by_frame: bool,
    sink: &mut S,
) -> Result<Vec<PathBuf>, ConvertError> {
    let channels = morph_channels(vmd, sort_by_frame);

    let mut paths = Vec::new();
    for mesh in meshes {
        let path = morph_clip_path(input, &mesh.name);
        let clip = Clip::new(clip_name(&path), mesh_morph_channels(&channels, mesh));
        replace_clip(&clip, &path, sink)?;
        paths.push(path);
    }
    info!("saved {} morph clips", paths.len());
    Ok(paths)
}

/// The extension must mention the motion format, matched without regard
/// to case.
fn check_extension(input: &Path) -> Result<(), ConvertError> {
    let supported = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.to_uppercase().contains("VMD"));
    if supported {
        Ok(())
    } else {
        Err(ConvertError::UnsupportedExtension(input.to_owned()))
    }
}

fn clip_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn replace_clip<S: ClipSink>(clip: &Clip, path: &Path, sink: &mut S) -> Result<(), SaveClipError> {
    if sink.exists(path) {
        sink.delete(path)?;
    }
    sink.write(clip, path)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use vmd_lib::vmd::{CameraCurve, CameraFrame, CurvePoints, MorphFrame, Version};

    use super::*;

    #[derive(Default)]
    struct MemorySink {
        files: HashMap<PathBuf, Clip>,
        deleted: Vec<PathBuf>,
    }

    impl ClipSink for MemorySink {
        fn write(&mut self, clip: &Clip, path: &Path) -> Result<(), SaveClipError> {
            self.files.insert(path.to_owned(), clip.clone());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn delete(&mut self, path: &Path) -> Result<(), SaveClipError> {
            self.files.remove(path);
            self.deleted.push(path.to_owned());
            Ok(())
        }
    }

    fn motion(camera_frames: Vec<CameraFrame>, morph_frames: Vec<MorphFrame>) -> Vmd {
        Vmd {
            version: Version::V2,
            model_name: "model".to_string(),
            bone_frames: Vec::new(),
            morph_frames,
            camera_frames,
            light_frames: Vec::new(),
            self_shadow_frames: Vec::new(),
            ik_frames: Vec::new(),
        }
    }

    fn linear_curve() -> CameraCurve {
        let linear = CurvePoints {
            ax: 20,
            ay: 20,
            bx: 107,
            by: 107,
        };
        CameraCurve {
            x: linear,
            y: linear,
            z: linear,
            rotation: linear,
            distance: linear,
            fov: linear,
        }
    }

    fn camera_frame(frame_index: u32) -> CameraFrame {
        CameraFrame {
            frame_index,
            distance: -35.0,
            position: [0.0; 3],
            rotation: [0.0; 3],
            curve: linear_curve(),
            field_of_view: 30,
            perspective: 0,
        }
    }

    fn morph_frame(name: &str, frame_index: u32) -> MorphFrame {
        MorphFrame {
            morph_name: name.to_string(),
            frame_index,
            weight: 1.0,
        }
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let mut sink = MemorySink::default();
        let result = convert_camera("model.pmx".as_ref(), &mut sink);
        assert!(matches!(
            result,
            Err(ConvertError::UnsupportedExtension(_))
        ));
        assert!(sink.files.is_empty());
    }

    #[test]
    fn camera_clip_written_next_to_source() {
        let vmd = motion(vec![camera_frame(0)], Vec::new());
        let mut sink = MemorySink::default();

        let path = write_camera_clip(&vmd, "motions/dance.vmd".as_ref(), &mut sink).unwrap();
        assert_eq!(PathBuf::from("motions/dance.anim"), path);

        let clip = &sink.files[&path];
        assert_eq!("dance", clip.name);
        assert_eq!(30.0, clip.frame_rate);
        assert_eq!(8, clip.curves.len());
    }

    #[test]
    fn morph_clips_fan_out_per_mesh() {
        let vmd = motion(Vec::new(), vec![morph_frame("Smile", 0)]);
        let meshes = vec![
            TargetMesh {
                name: "Face".to_string(),
                blend_shape_names: vec!["Face.Smile".to_string()],
            },
            TargetMesh {
                name: "Body".to_string(),
                blend_shape_names: Vec::new(),
            },
        ];
        let mut sink = MemorySink::default();

        let paths =
            write_morph_clips(&vmd, "dance.vmd".as_ref(), &meshes, false, &mut sink).unwrap();
        assert_eq!(
            vec![
                PathBuf::from("dance - Face.anim"),
                PathBuf::from("dance - Body.anim"),
            ],
            paths
        );

        // The same channel resolves differently on each mesh.
        assert!(sink.files[&paths[0]].curves.contains_key("blendShape.Face.Smile"));
        assert!(sink.files[&paths[1]].curves.contains_key("blendShape.Smile"));
    }

    #[test]
    fn existing_clip_is_replaced() {
        let vmd = motion(Vec::new(), vec![morph_frame("Smile", 0)]);
        let meshes = vec![TargetMesh {
            name: "Face".to_string(),
            blend_shape_names: Vec::new(),
        }];
        let mut sink = MemorySink::default();

        let first = write_morph_clips(&vmd, "dance.vmd".as_ref(), &meshes, false, &mut sink)
            .unwrap();
        write_morph_clips(&vmd, "dance.vmd".as_ref(), &meshes, false, &mut sink).unwrap();

        assert_eq!(first, sink.deleted);
        assert_eq!(1, sink.files.len());
    }

    #[test]
    fn no_meshes_writes_nothing() {
        let vmd = motion(Vec::new(), vec![morph_frame("Smile", 0)]);
        let mut sink = MemorySink::default();

        let paths = write_morph_clips(&vmd, "dance.vmd".as_ref(), &[], false, &mut sink).unwrap();
        assert!(paths.is_empty());
        assert!(sink.files.is_empty());
    }
}
