//! Bone, morph, and camera keyframes in `.vmd` files.
//!
//! Sections appear in a fixed order and each stores a `u32` frame count
//! followed by fixed size records. The lighting, self shadow, and IK
//! sections were added to the format over time and may be absent entirely
//! in older files.
use binrw::{BinRead, binread};

use crate::{parse_shift_jis, parse_trailing_count32};

#[binread]
#[derive(Debug, PartialEq, Clone)]
#[br(little)]
pub struct Vmd {
    pub version: Version,

    /// Name of the model the motion was recorded against.
    #[br(pad_before = 5, parse_with = parse_shift_jis, args(version.model_name_len()))]
    pub model_name: String,

    #[br(temp)]
    bone_frame_count: u32,

    /// Bone pose keyframes in on-disk order.
    #[br(count = bone_frame_count)]
    pub bone_frames: Vec<BoneFrame>,

    #[br(temp)]
    morph_frame_count: u32,

    /// Morph weight keyframes in on-disk order.
    #[br(count = morph_frame_count)]
    pub morph_frames: Vec<MorphFrame>,

    #[br(temp)]
    camera_frame_count: u32,

    /// Camera keyframes in on-disk order, not necessarily sorted by frame.
    #[br(count = camera_frame_count)]
    pub camera_frames: Vec<CameraFrame>,

    #[br(parse_with = parse_trailing_count32)]
    pub light_frames: Vec<LightFrame>,

    #[br(parse_with = parse_trailing_count32)]
    pub self_shadow_frames: Vec<SelfShadowFrame>,

    #[br(parse_with = parse_trailing_count32)]
    pub ik_frames: Vec<ShowIkFrame>,
}

/// The 30 byte signature at the start of the file.
///
/// The variant determines the width of the model name field that follows.
#[derive(Debug, BinRead, PartialEq, Eq, Clone, Copy)]
pub enum Version {
    /// `"Vocaloid Motion Data file"` with a 10 byte model name.
    #[br(magic = b"Vocaloid Motion Data file")]
    V1,

    /// `"Vocaloid Motion Data 0002"` with a 20 byte model name.
    #[br(magic = b"Vocaloid Motion Data 0002")]
    V2,
}

impl Version {
    pub fn model_name_len(&self) -> usize {
        match self {
            Version::V1 => 10,
            Version::V2 => 20,
        }
    }
}

/// A single bone pose sample.
///
/// Not used by the camera or morph conversion paths
/// but decoded in full to keep the cursor on the section boundary.
#[derive(Debug, BinRead, PartialEq, Clone)]
pub struct BoneFrame {
    #[br(parse_with = parse_shift_jis, args(15_usize))]
    pub bone_name: String,

    pub frame_index: u32,
    pub translation: [f32; 3],

    /// Rotation quaternion (x, y, z, w).
    pub rotation: [f32; 4],

    pub interpolation: [u8; 64],
}

/// A single morph (blend shape) weight sample.
#[derive(Debug, BinRead, PartialEq, Clone)]
pub struct MorphFrame {
    #[br(parse_with = parse_shift_jis, args(15_usize))]
    pub morph_name: String,

    pub frame_index: u32,

    /// Weight in the format's 0.0 to 1.0 convention.
    pub weight: f32,
}

/// A single camera pose sample.
#[derive(Debug, BinRead, PartialEq, Clone)]
pub struct CameraFrame {
    pub frame_index: u32,

    /// Distance from the camera to its look target.
    pub distance: f32,

    /// Look target offset in format units.
    pub position: [f32; 3],

    /// Per axis Euler angles in radians.
    pub rotation: [f32; 3],

    pub curve: CameraCurve,

    /// Field of view in degrees.
    pub field_of_view: u32,

    /// 0 when perspective projection is enabled.
    pub perspective: u8,
}

/// Bezier-like control points for one interpolated channel group.
#[derive(Debug, BinRead, PartialEq, Eq, Clone, Copy)]
pub struct CurvePoints {
    pub ax: u8,
    pub ay: u8,
    pub bx: u8,
    pub by: u8,
}

/// Interpolation control bytes for each camera channel group.
#[derive(Debug, BinRead, PartialEq, Eq, Clone, Copy)]
pub struct CameraCurve {
    pub x: CurvePoints,
    pub y: CurvePoints,
    pub z: CurvePoints,
    pub rotation: CurvePoints,
    pub distance: CurvePoints,
    pub fov: CurvePoints,
}

/// A single scene lighting sample.
#[derive(Debug, BinRead, PartialEq, Clone)]
pub struct LightFrame {
    pub frame_index: u32,
    pub color: [f32; 3],
    pub direction: [f32; 3],
}

/// A single self shadow sample.
#[derive(Debug, BinRead, PartialEq, Clone)]
pub struct SelfShadowFrame {
    pub frame_index: u32,
    pub mode: u8,
    pub distance: f32,
}

/// Model visibility and per bone IK enable toggles.
#[binread]
#[derive(Debug, PartialEq, Clone)]
pub struct ShowIkFrame {
    pub frame_index: u32,
    pub visible: u8,

    #[br(temp)]
    ik_count: u32,

    #[br(count = ik_count)]
    pub ik_states: Vec<IkState>,
}

#[derive(Debug, BinRead, PartialEq, Clone)]
pub struct IkState {
    #[br(parse_with = parse_shift_jis, args(20_usize))]
    pub bone_name: String,

    pub enabled: u8,
}
