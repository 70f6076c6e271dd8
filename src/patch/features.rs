//! Toggle feature flags in an ath10k `firmware-N.bin` container
//!
//! The WCN3990 firmware sends single channel-info events instead of pairs;
//! without `single-chan-info-per-channel` the driver warns about it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::context::ExecutionContext;
use crate::error::{FwError, Result};
use crate::logger::Logger;
use crate::tool::ExternalTool;

use super::Patch;

/// Rewrites the feature set of a firmware image in place using the
/// firmware encoder's modify mode
#[derive(Debug, Clone)]
pub struct FeatureFlags {
    image: PathBuf,
    features: Vec<String>,
    encoder: ExternalTool,
}

impl FeatureFlags {
    /// `image` is relative to the output root
    pub fn new<I, S>(image: impl Into<PathBuf>, features: I, encoder: ExternalTool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            image: image.into(),
            features: features.into_iter().map(Into::into).collect(),
            encoder,
        }
    }

    /// Encoder arguments for `image_path`
    pub fn arguments(&self, image_path: &Path) -> Vec<OsString> {
        vec![
            OsString::from("--modify"),
            OsString::from(format!("--features={}", self.features.join(","))),
            image_path.as_os_str().to_os_string(),
        ]
    }
}

impl Patch for FeatureFlags {
    fn name(&self) -> &str {
        "ath10k/firmware-5.bin"
    }

    fn prerequisites(&self) -> Vec<PathBuf> {
        vec![self.image.clone()]
    }

    fn apply(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()> {
        if self.features.is_empty() {
            return Err(FwError::PatchStepFailed {
                message: "no features to set".to_string(),
            });
        }

        let image = ctx.output_path(&self.image);
        self.encoder.run(self.arguments(&image), log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURES: [&str; 4] = [
        "wowlan",
        "mgmt-tx-by-ref",
        "non-bmi",
        "single-chan-info-per-channel",
    ];

    #[test]
    fn test_arguments() {
        let patch = FeatureFlags::new("fw.bin", FEATURES, ExternalTool::new("enc"));
        assert_eq!(
            patch.arguments(Path::new("/out/fw.bin")),
            vec![
                OsString::from("--modify"),
                OsString::from(
                    "--features=wowlan,mgmt-tx-by-ref,non-bmi,single-chan-info-per-channel"
                ),
                OsString::from("/out/fw.bin"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_image_path_passed_unchanged() {
        use std::os::unix::ffi::OsStrExt;

        let image = Path::new(std::ffi::OsStr::from_bytes(b"/out/fw-\xff.bin"));
        let patch = FeatureFlags::new("fw.bin", ["wowlan"], ExternalTool::new("enc"));
        let args = patch.arguments(image);
        assert_eq!(args[2].as_bytes(), b"/out/fw-\xff.bin");
    }

    #[test]
    fn test_empty_feature_list_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = ExecutionContext::new(temp.path(), temp.path());
        let patch = FeatureFlags::new("fw.bin", Vec::<String>::new(), ExternalTool::new("enc"));
        assert!(matches!(
            patch.apply(&ctx, &Logger::new(true)),
            Err(FwError::PatchStepFailed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_modifies_image_in_place() {
        use crate::tool::write_script;
        use std::fs;

        let tools = tempfile::TempDir::new().unwrap();
        // Fake encoder: appends the feature argument to the image ($3)
        let encoder = write_script(tools.path(), "ath10k-fwencoder", "printf '%s' \"$2\" >> \"$3\"");

        let out = tempfile::TempDir::new().unwrap();
        fs::write(out.path().join("firmware-5.bin"), b"FW:").unwrap();

        let ctx = ExecutionContext::new(out.path(), out.path());
        FeatureFlags::new("firmware-5.bin", ["wowlan", "non-bmi"], ExternalTool::new(encoder))
            .apply(&ctx, &Logger::new(true))
            .unwrap();

        assert_eq!(
            fs::read_to_string(out.path().join("firmware-5.bin")).unwrap(),
            "FW:--features=wowlan,non-bmi"
        );
    }
}
