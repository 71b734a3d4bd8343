//! # vmd_model
//! vmd_model converts motions decoded by [vmd_lib] into animation clip
//! artifacts: named float curves sampled over time, persisted through an
//! injected [ClipSink] instead of a concrete asset store.
//!
//! Camera motions become a single clip animating the camera transform and
//! field of view. Morph motions fan out to one clip per target mesh, with
//! morph names resolved against each mesh's blend shape inventory.
//!
//! ```rust no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sink = vmd_model::JsonFileSink;
//! let clip_path = vmd_model::convert_camera("camera.vmd".as_ref(), &mut sink)?;
//! println!("{}", clip_path.display());
//! # Ok(())
//! # }
//! ```
use serde::{Deserialize, Serialize};

pub mod animation;
pub mod clip;
pub mod convert;
pub mod error;

pub use clip::{Clip, ClipSink, JsonFileSink};
pub use convert::{convert_camera, convert_morphs};

/// Blend shape inventory for one target skinned mesh.
///
/// This is the caller supplied stand-in for inspecting a live mesh asset.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TargetMesh {
    pub name: String,
    /// Registered blend shape names like `"Face.Smile"`.
    pub blend_shape_names: Vec<String>,
}
