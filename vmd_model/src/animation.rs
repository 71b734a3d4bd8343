//! Conversion of decoded motion frames into per property animation curves.
use glam::{EulerRot, Quat};
use indexmap::IndexMap;
use log::warn;
use serde::Serialize;
use vmd_lib::vmd::{CameraFrame, Vmd};

use crate::TargetMesh;

/// Nominal playback rate of the motion format.
pub const FRAME_RATE: f32 = 30.0;

/// Empirically determined scale from format distance units to scene units.
pub const POSITION_SCALE: f32 = 0.085;

/// A single time sampled value for one animatable property.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,

    /// Outgoing tangent metadata derived from the interpolation control
    /// bytes. Carried on rotation samples but not applied to the
    /// interpolation of any emitted curve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_tangent: Option<f32>,
}

/// Ordered samples for one named animatable property.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct CurveChannel {
    pub keyframes: Vec<Keyframe>,
}

/// Convert a frame number to seconds at the nominal rate.
pub fn frame_time(frame_index: u32) -> f32 {
    frame_index as f32 / FRAME_RATE
}

/// Remap an interpolation control byte in 0..=127 onto -1.0..=1.0.
pub fn rotation_out_tangent(ay: u8) -> f32 {
    -1.0 + (ay as f32 / 127.0) * 2.0
}

/// Compose the per axis Euler angles of `frame` into a single rotation.
///
/// The angles are applied around z, then x, then y without reordering the
/// format's axes.
fn camera_rotation(frame: &CameraFrame) -> Quat {
    let [x, y, z] = frame.rotation;
    Quat::from_euler(EulerRot::YXZ, y, x, z)
}

/// Build the eight camera channels from the camera frames of `vmd`.
///
/// Frames are stably sorted by frame index first, so duplicate indices
/// keep their on-disk order. The rotation is decomposed into its four
/// quaternion components rather than Euler angles, which keeps the
/// sampled curves free of gimbal and angle wrap discontinuities.
pub fn camera_channels(vmd: &Vmd) -> IndexMap<String, CurveChannel> {
    if vmd.camera_frames.is_empty() {
        return IndexMap::new();
    }

    let mut frames: Vec<_> = vmd.camera_frames.iter().collect();
    frames.sort_by_key(|f| f.frame_index);

    let position = |axis: usize| CurveChannel {
        keyframes: frames
            .iter()
            .map(|f| Keyframe {
                time: frame_time(f.frame_index),
                value: f.position[axis] * POSITION_SCALE,
                out_tangent: None,
            })
            .collect(),
    };

    let rotations: Vec<_> = frames
        .iter()
        .map(|f| {
            (
                frame_time(f.frame_index),
                camera_rotation(f),
                rotation_out_tangent(f.curve.rotation.ay),
            )
        })
        .collect();

    let rotation = |component: usize| CurveChannel {
        keyframes: rotations
            .iter()
            .map(|(time, q, tangent)| Keyframe {
                time: *time,
                value: q.to_array()[component],
                out_tangent: Some(*tangent),
            })
            .collect(),
    };

    let fov = CurveChannel {
        keyframes: frames
            .iter()
            .map(|f| Keyframe {
                time: frame_time(f.frame_index),
                value: f.field_of_view as f32,
                out_tangent: None,
            })
            .collect(),
    };

    IndexMap::from_iter([
        ("localPosition.x".to_string(), position(0)),
        ("localPosition.y".to_string(), position(1)),
        ("localPosition.z".to_string(), position(2)),
        ("localRotation.x".to_string(), rotation(0)),
        ("localRotation.y".to_string(), rotation(1)),
        ("localRotation.z".to_string(), rotation(2)),
        ("localRotation.w".to_string(), rotation(3)),
        ("field of view".to_string(), fov),
    ])
}

/// Group the morph frames of `vmd` into one channel per morph name with
/// weights scaled to the 0 to 100 range.
///
/// Unlike the camera path, samples keep their source scan order unless
/// `sort_by_frame` is set. The original tool never sorted morph
/// keyframes, so sorting is opt-in until that behavior is confirmed
/// unintended.
pub fn morph_channels(vmd: &Vmd, sort_by_frame: bool) -> IndexMap<String, CurveChannel> {
    let mut channels: IndexMap<String, CurveChannel> = IndexMap::new();
    for frame in &vmd.morph_frames {
        channels
            .entry(frame.morph_name.clone())
            .or_default()
            .keyframes
            .push(Keyframe {
                time: frame_time(frame.frame_index),
                value: frame.weight * 100.0,
                out_tangent: None,
            });
    }

    if sort_by_frame {
        for channel in channels.values_mut() {
            channel.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        }
    }

    channels
}

/// Find the blend shape registered on a mesh for `morph_name`.
///
/// Meshes register shapes under group prefixes like `"Face.Smile"` while
/// motions store only the bare name, so the match is against the suffix
/// after the final `.`. An unmatched name is used verbatim.
pub fn resolve_blend_shape(blend_shape_names: &[String], morph_name: &str) -> String {
    blend_shape_names
        .iter()
        .find(|name| name.rsplit('.').next() == Some(morph_name))
        .cloned()
        .unwrap_or_else(|| {
            warn!("no blend shape matches morph {morph_name:?}");
            morph_name.to_string()
        })
}

/// Key each morph channel as a blend shape property of `mesh`.
///
/// Resolution is independent per mesh. The same channels may resolve to
/// different property names on another mesh.
pub fn mesh_morph_channels(
    channels: &IndexMap<String, CurveChannel>,
    mesh: &TargetMesh,
) -> IndexMap<String, CurveChannel> {
    channels
        .iter()
        .map(|(morph_name, channel)| {
            (
                format!(
                    "blendShape.{}",
                    resolve_blend_shape(&mesh.blend_shape_names, morph_name)
                ),
                channel.clone(),
            )
        })
        .collect()
}
