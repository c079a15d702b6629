//! Version field managers, one per project file format

mod gradle;
mod package_json;
mod pbxproj;

pub use gradle::GradleManager;
pub use package_json::{PackageJson, PackageJsonManager};
pub use pbxproj::PbxprojManager;
